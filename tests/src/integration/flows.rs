//! End-to-end flows: payload submission through the API gateway, block
//! construction under the consensus driver, and chain reads back out.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use node_runtime::DevEngine;
use serde_json::{json, Value};
use shared_bus::engine_channel;
use shared_types::{encoding, BlockId, DATA_LEN};
use std::sync::Arc;
use std::time::Duration;
use tc_01_chain_state::adapters::{
    BincodeBlockCodec, FileBackedKVStore, InMemoryKVStore, SystemTimeSource,
};
use tc_01_chain_state::{ChainStateApi, ChainStateService, ChainedBlock, KeyValueStore};
use tc_02_api_gateway::ApiGatewayService;
use tokio::sync::watch;
use tower::ServiceExt;

fn new_chain(store: Box<dyn KeyValueStore>) -> (Arc<ChainStateService>, shared_bus::EngineMailbox) {
    let (notifier, mailbox) = engine_channel();
    let service = Arc::new(ChainStateService::new(
        store,
        Box::new(BincodeBlockCodec),
        Arc::new(SystemTimeSource),
        notifier,
    ));
    service.initialize(&[0u8; DATA_LEN]).unwrap();
    (service, mailbox)
}

async fn rpc(router: axum::Router, request: Value) -> Value {
    let response = router
        .oneshot(
            Request::post("/")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(request.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn wait_until<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn propose_over_http_is_finalized_and_readable() {
    let (service, mailbox) = new_chain(Box::new(InMemoryKVStore::new()));
    let genesis_id = service.last_accepted();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let chain: Arc<dyn ChainStateApi> = service.clone();
    let engine_handle = tokio::spawn(DevEngine::new(chain, mailbox, shutdown_rx).run());

    let gateway = ApiGatewayService::new(
        "127.0.0.1:0".parse().unwrap(),
        service.clone() as Arc<dyn ChainStateApi>,
    );
    let router = gateway.router();

    // Submit a payload through the API.
    let payload = [0x42u8; DATA_LEN];
    let reply = rpc(
        router.clone(),
        json!({
            "jsonrpc": "2.0",
            "method": "tempo_proposeBlock",
            "params": { "data": encoding::encode(&payload) },
            "id": 1,
        }),
    )
    .await;
    assert_eq!(reply["result"]["success"], json!(true));

    // The consensus driver finalizes it.
    let svc = service.clone();
    wait_until(move || svc.last_accepted() != genesis_id).await;

    // Read it back through the API, by default and by explicit id.
    let tip = rpc(
        router.clone(),
        json!({ "jsonrpc": "2.0", "method": "tempo_getBlock", "id": 2 }),
    )
    .await;
    assert_eq!(
        encoding::decode(tip["result"]["data"].as_str().unwrap()).unwrap(),
        payload.to_vec()
    );
    assert_eq!(
        tip["result"]["parentID"].as_str().unwrap(),
        genesis_id.to_string()
    );
    assert!(tip["result"]["timestamp"].as_i64().unwrap() > 0);

    let by_id = rpc(
        router,
        json!({
            "jsonrpc": "2.0",
            "method": "tempo_getBlock",
            "params": { "id": tip["result"]["id"] },
            "id": 3,
        }),
    )
    .await;
    assert_eq!(by_id["result"], tip["result"]);

    shutdown_tx.send(true).unwrap();
    engine_handle.await.unwrap();
}

#[tokio::test]
async fn a_burst_of_proposals_becomes_a_chain_in_fifo_order() {
    let (service, mailbox) = new_chain(Box::new(InMemoryKVStore::new()));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let chain: Arc<dyn ChainStateApi> = service.clone();
    let engine_handle = tokio::spawn(DevEngine::new(chain, mailbox, shutdown_rx).run());

    for tag in 1..=4u8 {
        service.propose_block([tag; DATA_LEN]).unwrap();
    }

    let svc = service.clone();
    wait_until(move || {
        svc.get_block(&svc.last_accepted())
            .map(|b| b.data == [4u8; DATA_LEN])
            .unwrap_or(false)
    })
    .await;

    // Walk the chain backwards: 4, 3, 2, 1, genesis.
    let mut id = service.last_accepted();
    for expected in (1..=4u8).rev() {
        let block = service.get_block(&id).unwrap();
        assert_eq!(block.data, [expected; DATA_LEN]);
        assert!(block.timestamp > 0);
        id = block.parent_id();
    }
    assert_eq!(service.get_block(&id).unwrap().parent_id(), BlockId::EMPTY);

    shutdown_tx.send(true).unwrap();
    engine_handle.await.unwrap();
}

#[tokio::test]
async fn a_restarted_node_serves_its_finalized_chain() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chain.db");

    let tip_id = {
        let (service, mailbox) = new_chain(Box::new(FileBackedKVStore::open(&path)));
        let genesis_id = service.last_accepted();

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let chain: Arc<dyn ChainStateApi> = service.clone();
        let engine_handle = tokio::spawn(DevEngine::new(chain, mailbox, shutdown_rx).run());

        service.propose_block([0x99u8; DATA_LEN]).unwrap();
        let svc = service.clone();
        wait_until(move || svc.last_accepted() != genesis_id).await;

        shutdown_tx.send(true).unwrap();
        engine_handle.await.unwrap();
        service.last_accepted()
    };

    // A fresh process over the same store resumes instead of re-running
    // genesis, and serves the finalized block over the API.
    let (service, _mailbox) = new_chain(Box::new(FileBackedKVStore::open(&path)));
    assert_eq!(service.last_accepted(), tip_id);

    let gateway = ApiGatewayService::new(
        "127.0.0.1:0".parse().unwrap(),
        service as Arc<dyn ChainStateApi>,
    );
    let tip = rpc(
        gateway.router(),
        json!({ "jsonrpc": "2.0", "method": "tempo_getBlock", "id": 1 }),
    )
    .await;
    assert_eq!(tip["result"]["id"].as_str().unwrap(), tip_id.to_string());
    assert_eq!(
        encoding::decode(tip["result"]["data"].as_str().unwrap()).unwrap(),
        vec![0x99u8; DATA_LEN]
    );
}

#[tokio::test]
async fn bad_payloads_never_reach_the_mempool() {
    let (service, _mailbox) = new_chain(Box::new(InMemoryKVStore::new()));
    let gateway = ApiGatewayService::new(
        "127.0.0.1:0".parse().unwrap(),
        service.clone() as Arc<dyn ChainStateApi>,
    );
    let router = gateway.router();

    // Wrong size, bad checksum, invalid alphabet.
    for data in [
        encoding::encode(&[1u8; 16]),
        "111".to_string(),
        "0OIl+".to_string(),
    ] {
        let reply = rpc(
            router.clone(),
            json!({
                "jsonrpc": "2.0",
                "method": "tempo_proposeBlock",
                "params": { "data": data },
                "id": 1,
            }),
        )
        .await;
        assert!(reply.get("error").is_some(), "payload {data:?} was accepted");
    }

    assert_eq!(service.pending_payloads(), 0);
}
