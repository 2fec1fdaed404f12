use wasm_bindgen::prelude::*;
use perlin_core::{export, ChannelStack, TextureParams};

fn build(params_json: &str) -> Result<ChannelStack, JsValue> {
    let params = TextureParams::from_json(params_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid params: {e}")))?;
    ChannelStack::build(&params).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate a texture from the given parameters JSON and return it as a
/// `data:image/bmp;base64,` URL.
#[wasm_bindgen(js_name = generateDataUrl)]
pub fn generate_data_url(params_json: &str) -> Result<String, JsValue> {
    let stack = build(params_json)?;
    export::data_url(&stack).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Generate a texture and return its cells as CSS colour strings, row-major.
/// `mode` is `"mono"`, `"rgb"` or `"rgba"`.
#[wasm_bindgen(js_name = generateColors)]
pub fn generate_colors(params_json: &str, mode: &str) -> Result<JsValue, JsValue> {
    let stack = build(params_json)?;
    let mut colors = Vec::with_capacity(stack.width() * stack.height());
    for y in 0..stack.height() {
        for x in 0..stack.width() {
            let css = match mode {
                "mono" => stack.mono(x, y),
                "rgb" => stack.rgb(x, y),
                "rgba" => stack.rgba(x, y, None),
                other => return Err(JsValue::from_str(&format!("Unknown colour mode {other:?}"))),
            };
            colors.push(css.map_err(|e| JsValue::from_str(&e.to_string()))?);
        }
    }
    serde_wasm_bindgen::to_value(&colors).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Raw BMP bytes for the given parameters JSON.
#[wasm_bindgen(js_name = generateBitmap)]
pub fn generate_bitmap(params_json: &str) -> Result<js_sys::Uint8Array, JsValue> {
    let stack = build(params_json)?;
    let bmp = export::bmp_bytes(&stack).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(js_sys::Uint8Array::from(bmp.as_slice()))
}
