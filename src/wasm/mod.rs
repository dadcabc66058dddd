//! WASM bindings for the typesetter

mod flat_buffer;

pub use flat_buffer::{
    LineBuffer, FLAG_IS_HYPHEN, F64_PER_ITEM, F64_PER_LINE, HEADER_SIZE, ITEM_BOX, ITEM_GLUE,
    MAGIC, SCHEMA_VERSION, U32_PER_ITEM, U32_PER_LINE,
};

use crate::hyphenation::{hyphenate_with, HyphenateListener, NullListener, PatternTree};
use crate::layout::{BreakConfig, Typesetter};
use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// WASM-exposed typesetter: one pattern tree, one configuration
#[wasm_bindgen]
pub struct WasmTypesetter {
    tree: PatternTree,
    config: BreakConfig,
    buffer: LineBuffer,
}

#[wasm_bindgen]
impl WasmTypesetter {
    /// Create a typesetter from a pattern tree in JSON form
    #[wasm_bindgen(constructor)]
    pub fn new(patterns_json: &str) -> Result<WasmTypesetter, JsError> {
        Self::with_config(patterns_json, "{}")
    }

    /// Create a typesetter with a JSON break configuration; missing keys keep
    /// their defaults
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(patterns_json: &str, config_json: &str) -> Result<WasmTypesetter, JsError> {
        let tree = PatternTree::from_json(patterns_json)?;
        let config = BreakConfig::from_json(config_json)?;
        config.validate()?;
        Ok(Self {
            tree,
            config,
            buffer: LineBuffer::new(),
        })
    }

    /// Split a word into syllables. The optional listener object receives
    /// `onStart(word)`, `onMatch(column, pattern)` and `onEnd(points)`.
    pub fn hyphenate(&self, word: &str, listener: Option<Object>) -> Array {
        let syllables = match listener {
            Some(object) => hyphenate_with(&self.tree, word, &mut JsListener { object }),
            None => hyphenate_with(&self.tree, word, &mut NullListener),
        };
        syllables.into_iter().map(JsValue::from_str).collect()
    }

    /// Justify `text`, measuring strings with `compute_width(s) -> number`.
    /// Returns the number of lines; the lines themselves are in the flat
    /// buffer.
    #[wasm_bindgen(js_name = lineBreak)]
    pub fn line_break(
        &mut self,
        text: &str,
        compute_width: &Function,
        line_width: f64,
    ) -> Result<u32, JsError> {
        let measure = |s: &str| {
            compute_width
                .call1(&JsValue::NULL, &JsValue::from_str(s))
                .ok()
                .and_then(|width| width.as_f64())
                .unwrap_or(f64::NAN)
        };

        let typesetter = Typesetter::new(&self.tree).with_config(self.config);
        let lines = typesetter.line_break(text, &measure, line_width)?;
        self.buffer.write_lines(&lines);
        Ok(self.buffer.line_count())
    }

    /// Number of patterns in the loaded tree
    #[wasm_bindgen(js_name = patternCount)]
    pub fn pattern_count(&self) -> usize {
        self.tree.pattern_count()
    }

    // Flat buffer accessors

    #[wasm_bindgen(js_name = u32Ptr)]
    pub fn u32_ptr(&self) -> u32 {
        self.buffer.u32_ptr()
    }

    #[wasm_bindgen(js_name = u32Len)]
    pub fn u32_len(&self) -> u32 {
        self.buffer.u32_len()
    }

    #[wasm_bindgen(js_name = f64Ptr)]
    pub fn f64_ptr(&self) -> u32 {
        self.buffer.f64_ptr()
    }

    #[wasm_bindgen(js_name = f64Len)]
    pub fn f64_len(&self) -> u32 {
        self.buffer.f64_len()
    }

    #[wasm_bindgen(js_name = textPtr)]
    pub fn text_ptr(&self) -> u32 {
        self.buffer.text_ptr()
    }

    #[wasm_bindgen(js_name = textLen)]
    pub fn text_len(&self) -> u32 {
        self.buffer.text_len()
    }
}

/// Forwards hyphenation trace events to a JS object
struct JsListener {
    object: Object,
}

impl JsListener {
    fn call(&self, name: &str, args: &Array) {
        let Ok(callback) = Reflect::get(&self.object, &JsValue::from_str(name)) else {
            return;
        };
        if let Some(callback) = callback.dyn_ref::<Function>() {
            if callback.apply(&self.object, args).is_err() {
                log::warn!("hyphenation listener {} threw", name);
            }
        }
    }
}

impl HyphenateListener for JsListener {
    fn on_start(&mut self, word: &str) {
        self.call("onStart", &Array::of1(&JsValue::from_str(word)));
    }

    fn on_match(&mut self, column: usize, pattern: &str) {
        self.call(
            "onMatch",
            &Array::of2(&JsValue::from(column as u32), &JsValue::from_str(pattern)),
        );
    }

    fn on_end(&mut self, points: &str) {
        self.call("onEnd", &Array::of1(&JsValue::from_str(points)));
    }
}
