// 只暴露同步的拼接接口，数据源需要在 JS 侧实现

use crate::{
    LyricsAnnotator,
    annotator::types::Annotation,
    config::AnnotatorConfig,
    error::AnnotatorError,
    model::song::SongInput,
};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main_js() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    Ok(())
}

fn malformed(e: serde_wasm_bindgen::Error) -> JsValue {
    JsValue::from_str(&AnnotatorError::MalformedInput(e.to_string()).to_string())
}

#[wasm_bindgen]
pub struct WasmLyricsAnnotator {
    annotator: LyricsAnnotator,
}

#[wasm_bindgen]
impl WasmLyricsAnnotator {
    /// `config_js` 为 `undefined` 或 `null` 时使用默认配置。
    #[wasm_bindgen(constructor)]
    pub fn new(config_js: JsValue) -> Result<WasmLyricsAnnotator, JsValue> {
        let config = if config_js.is_undefined() || config_js.is_null() {
            AnnotatorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config_js).map_err(malformed)?
        };
        Ok(Self {
            annotator: LyricsAnnotator::with_config(config),
        })
    }

    pub fn annotate(&self, lyrics: &str, annotations_js: JsValue) -> Result<JsValue, JsValue> {
        let annotations: Vec<Annotation> =
            serde_wasm_bindgen::from_value(annotations_js).map_err(malformed)?;
        let result = self.annotator.annotate(lyrics, &annotations);
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    #[wasm_bindgen(js_name = annotateAlbum)]
    pub fn annotate_album(&self, songs_js: JsValue) -> Result<JsValue, JsValue> {
        let songs: Vec<SongInput> = serde_wasm_bindgen::from_value(songs_js).map_err(malformed)?;
        let result = self.annotator.annotate_album(&songs);
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    #[wasm_bindgen(js_name = annotateJson)]
    pub fn annotate_json(&self, json: &str) -> Result<JsValue, JsValue> {
        let result = self
            .annotator
            .annotate_json(json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }
}
