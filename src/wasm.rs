use wasm_bindgen::prelude::*;

use crate::Order;

fn order(n: u8) -> Result<usize, JsError> {
    Order::new(usize::from(n))
        .map(Order::get)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Maximum number of flips over every permutation of order `n`.
///
/// `n` must be at most 20.
#[wasm_bindgen(js_name = maxFlips)]
pub fn max_flips(n: u8) -> Result<u32, JsError> {
    Ok(crate::max_flips(order(n)?))
}

/// Runs the flip counter and returns
/// `{ n, checksum, maxFlips, permutations }`.
#[wasm_bindgen]
pub fn fannkuch(n: u8) -> Result<JsValue, JsError> {
    let result = crate::fannkuch(order(n)?);
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsError::new(&e.to_string()))
}
