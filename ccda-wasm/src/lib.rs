//! Bridge WASM <-> JavaScript cho bộ đọc C-CDA.

use ccda_core::{CcdaError, DocumentKind, ExtractConfig, SectionCatalog};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Cấu hình một phần từ JS, phủ lên giá trị mặc định.
#[derive(Deserialize, Default)]
struct JsExtractConfig {
    #[serde(default)]
    retain_raw: Option<bool>,
    #[serde(default)]
    unknown_kind_fallback: Option<DocumentKind>,
    #[serde(default)]
    match_section_titles: Option<bool>,
    #[serde(default)]
    match_section_codes: Option<bool>,
}

impl From<JsExtractConfig> for ExtractConfig {
    fn from(cfg: JsExtractConfig) -> Self {
        let mut base = ExtractConfig::default();
        if let Some(retain) = cfg.retain_raw {
            base.retain_raw = retain;
        }
        if let Some(kind) = cfg.unknown_kind_fallback {
            base.unknown_kind_fallback = kind;
        }
        if let Some(titles) = cfg.match_section_titles {
            base.match_section_titles = titles;
        }
        if let Some(codes) = cfg.match_section_codes {
            base.match_section_codes = codes;
        }
        base
    }
}

/// Trích xuất từ cây đã parse sẵn (object JS dạng `@_attr` / `#text`).
#[wasm_bindgen]
pub fn extract_document(tree: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let tree_value = from_value::<serde_json::Value>(tree)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được cây tài liệu: {err}")))?;
    let cfg = read_config(config)?;

    let document = ccda_parser::extract_document_value(&tree_value, &SectionCatalog::standard(), &cfg)
        .map_err(|err| JsValue::from_str(&format_ccda_error(err)))?;
    to_js(&document)
}

/// Trích xuất trực tiếp từ chuỗi XML.
#[wasm_bindgen]
pub fn extract_xml(xml: &str, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let tree_value = ccda_xml::xml_to_tree(xml)
        .map_err(|err| JsValue::from_str(&format!("XML không hợp lệ: {err}")))?;
    let cfg = read_config(config)?;

    let document = ccda_parser::extract_document_value(&tree_value, &SectionCatalog::standard(), &cfg)
        .map_err(|err| JsValue::from_str(&format_ccda_error(err)))?;
    to_js(&document)
}

#[derive(Serialize)]
struct JsSectionInfo {
    id: &'static str,
    label: &'static str,
    required: bool,
}

/// Danh sách section áp dụng cho một loại tài liệu (`"care-plan"`, ...).
#[wasm_bindgen]
pub fn supported_sections(kind: &str) -> Result<JsValue, JsValue> {
    let kind: DocumentKind = kind
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Loại tài liệu không hợp lệ: {kind}")))?;
    let catalog = SectionCatalog::standard();
    let sections: Vec<JsSectionInfo> = catalog
        .supported_sections(kind)
        .into_iter()
        .map(|descriptor| JsSectionInfo {
            id: descriptor.id.as_str(),
            label: descriptor.label,
            required: descriptor.required,
        })
        .collect();
    to_js(&sections)
}

fn read_config(config: Option<JsValue>) -> Result<ExtractConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsExtractConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(ExtractConfig::from(cfg))
        }
        _ => Ok(ExtractConfig::default()),
    }
}

/// Map được chuyển thành object thường thay vì `Map` của JS.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

fn format_ccda_error(err: CcdaError) -> String {
    format!("C-CDA error: {err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_overlays_defaults() {
        let cfg: JsExtractConfig =
            serde_json::from_str(r#"{ "retain_raw": false, "unknown_kind_fallback": "progress-note" }"#)
                .expect("config");
        let cfg = ExtractConfig::from(cfg);
        assert!(!cfg.retain_raw);
        assert_eq!(cfg.unknown_kind_fallback, DocumentKind::ProgressNote);
        assert!(cfg.match_section_codes);
    }

    #[test]
    fn empty_overlay_is_default() {
        assert_eq!(
            ExtractConfig::from(JsExtractConfig::default()),
            ExtractConfig::default()
        );
    }
}
