use ehverify_core::{DEFAULT_PARAMS, Difficulty, SUPPORTED_PARAMS};
use wasm_bindgen::prelude::*;

/// Verify an Equihash solution.
///
/// `n` and `k` default to 150 and 5. Returns `false` for a header that is not
/// 32 bytes or a wrong proof; throws for unsupported parameters and malformed
/// nonce or solution buffers.
#[wasm_bindgen]
pub fn verify(
    header: &[u8],
    nonce: &[u8],
    solution: &[u8],
    n: Option<u32>,
    k: Option<u32>,
) -> Result<bool, JsError> {
    let n = n.unwrap_or(DEFAULT_PARAMS.n());
    let k = k.unwrap_or(DEFAULT_PARAMS.k());
    Ok(ehverify_core::verify(header, nonce, solution, n, k)?)
}

/// SHA-256 the solution buffer and check it against a packed difficulty
#[wasm_bindgen]
pub fn diffcheck(solution: &[u8], packed: u32) -> bool {
    ehverify_core::check_target(solution, packed)
}

/// Approximate magnitude of a packed difficulty
#[wasm_bindgen]
pub fn getdiff(packed: u32) -> f64 {
    ehverify_core::approximate_difficulty(packed)
}

/// Expanded 256-bit target as big-endian hex
#[wasm_bindgen]
pub fn expand_target(packed: u32) -> Result<String, JsError> {
    Ok(hex::encode(Difficulty(packed).expand()?.to_be_bytes()))
}

/// Supported parameter pairs as a JSON string
#[wasm_bindgen]
pub fn supported_params() -> String {
    let entries: Vec<String> = SUPPORTED_PARAMS
        .iter()
        .map(|p| {
            format!(
                r#"{{"n": {}, "k": {}, "solution_bytes": {}}}"#,
                p.n(),
                p.k(),
                p.solution_width()
            )
        })
        .collect();
    format!("[{}]", entries.join(", "))
}
