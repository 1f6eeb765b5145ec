//! Cross-subsystem integration flows.

#[cfg(test)]
mod flows;
