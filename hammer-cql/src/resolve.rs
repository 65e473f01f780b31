use scylla::statement::{Consistency, batch::BatchType};

/// Consistency used when the token is empty or not recognized.
pub const DEFAULT_CONSISTENCY: Consistency = Consistency::Quorum;
/// Batch type used when the token is empty or not recognized.
pub const DEFAULT_BATCH_TYPE: BatchType = BatchType::Logged;

/// Map a consistency token to the driver level.
///
/// Tokens are case sensitive, anything unknown falls back to [`DEFAULT_CONSISTENCY`].
pub fn resolve_consistency(token: &str) -> Consistency {
    match token {
        "all" => Consistency::All,
        "any" => Consistency::Any,
        "one" => Consistency::One,
        "two" => Consistency::Two,
        "three" => Consistency::Three,
        "each_quorum" => Consistency::EachQuorum,
        "quorum" => Consistency::Quorum,
        "local_one" => Consistency::LocalOne,
        "local_quorum" => Consistency::LocalQuorum,
        _ => DEFAULT_CONSISTENCY,
    }
}

/// Map a batch token (`"unlogged"`, `"counter"`) to the driver batch type.
///
/// Anything else, the empty string included, is a logged batch.
pub fn resolve_batch_type(token: &str) -> BatchType {
    match token {
        "unlogged" => BatchType::Unlogged,
        "counter" => BatchType::Counter,
        _ => DEFAULT_BATCH_TYPE,
    }
}
