use family_tree_layout::{LayoutDump, compute_layout, parse_config, parse_records};
use wasm_bindgen::prelude::*;

fn layout_json(records_json: &str, config_json: Option<&str>) -> Result<String, String> {
    let records = parse_records(records_json).map_err(|error| error.to_string())?;
    let config = match config_json {
        Some(raw_config) => parse_config(raw_config).map_err(|error| error.to_string())?,
        None => Default::default(),
    };
    let layout = compute_layout(&records, &config);
    LayoutDump::from_layout(&layout)
        .to_json()
        .map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_family_tree(records_json: &str, config_json: Option<String>) -> Result<String, JsValue> {
    layout_json(records_json, config_json.as_deref()).map_err(|error| JsValue::from_str(&error))
}
