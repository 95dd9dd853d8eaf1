//! The immutable text value exchanged between the host framework and models.

use crate::error::{CowsayError, Result};
use serde_json::{Map, Value};
use std::any::Any;
use std::sync::Arc;

/// Opaque, reference-counted handle to the asset a [`Text`] was derived from.
///
/// The model never inspects it; it is carried from input to output so the host
/// can trace provenance.
#[derive(Clone)]
pub struct SourceAsset(Arc<dyn Any + Send + Sync>);

impl SourceAsset {
    pub fn new<T: Any + Send + Sync>(asset: T) -> Self {
        Self(Arc::new(asset))
    }

    pub fn from_arc(asset: Arc<dyn Any + Send + Sync>) -> Self {
        Self(asset)
    }

    /// Borrow the asset as `T`, if that is what it holds.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// `true` if both handles point at the same asset.
    pub fn ptr_eq(&self, other: &SourceAsset) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for SourceAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SourceAsset(..)")
    }
}

/// A piece of text plus optional language, confidence, metadata, and source
/// asset.
///
/// Values are never mutated in place; the `with_*` methods consume and return
/// a new value. A text is valid when its content is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Text {
    content: String,
    language: Option<String>,
    confidence: Option<f32>,
    metadata: Map<String, Value>,
    source_asset: Option<SourceAsset>,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the confidence, clamped to `0.0..=1.0`. `NaN` clears it.
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = if confidence.is_nan() {
            None
        } else {
            Some(confidence.clamp(0.0, 1.0))
        };
        self
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_source_asset(mut self, asset: SourceAsset) -> Self {
        self.source_asset = Some(asset);
        self
    }

    /// Carry `source`'s asset reference over, replacing any existing one.
    pub(crate) fn with_source_of(mut self, source: &Text) -> Self {
        self.source_asset = source.source_asset.clone();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn confidence(&self) -> Option<f32> {
        self.confidence
    }

    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    pub fn source_asset(&self) -> Option<&SourceAsset> {
        self.source_asset.as_ref()
    }

    pub fn is_valid(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl From<&str> for Text {
    fn from(content: &str) -> Self {
        Self::new(content)
    }
}

impl From<String> for Text {
    fn from(content: String) -> Self {
        Self::new(content)
    }
}

/// Input accepted by [`TextToTextModel::transform`](crate::traits::TextToTextModel::transform):
/// a single text or an ordered sequence of which only the first is used.
#[derive(Debug, Clone)]
pub enum TextInput {
    Single(Text),
    Sequence(Vec<Text>),
}

impl TextInput {
    /// Reduce the input to the one text that will be transformed.
    pub fn into_text(self) -> Result<Text> {
        match self {
            Self::Single(text) => Ok(text),
            Self::Sequence(texts) => texts
                .into_iter()
                .next()
                .ok_or_else(|| CowsayError::Validation("empty input sequence".to_string())),
        }
    }
}

impl From<Text> for TextInput {
    fn from(text: Text) -> Self {
        Self::Single(text)
    }
}

impl From<Vec<Text>> for TextInput {
    fn from(texts: Vec<Text>) -> Self {
        Self::Sequence(texts)
    }
}

impl From<&str> for TextInput {
    fn from(content: &str) -> Self {
        Self::Single(Text::new(content))
    }
}

impl From<String> for TextInput {
    fn from(content: String) -> Self {
        Self::Single(Text::new(content))
    }
}
