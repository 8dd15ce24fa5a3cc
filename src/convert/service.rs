//! End-to-end conversion: pages in, stored artifact out.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Document;
use crate::ocr::PageSource;
use crate::parser::DocumentAssembler;
use crate::render::ExtractionStats;
use crate::storage::ArtifactStore;

use super::{ConvertOptions, ConvertResult, ConverterRegistry};

/// Assembles, renders and stores documents.
///
/// The registry and the store are handed in by the caller; the service
/// holds no other state and can be shared across threads.
pub struct ConversionService {
    registry: ConverterRegistry,
    store: Arc<dyn ArtifactStore>,
}

impl ConversionService {
    /// Create a service from its collaborators.
    pub fn new(registry: ConverterRegistry, store: Arc<dyn ArtifactStore>) -> Self {
        Self { registry, store }
    }

    /// Create a service with the default converters.
    pub fn with_store(store: Arc<dyn ArtifactStore>) -> Self {
        Self::new(ConverterRegistry::with_defaults(), store)
    }

    /// The converter registry.
    pub fn registry(&self) -> &ConverterRegistry {
        &self.registry
    }

    /// Load pages from `source`, assemble them into a document.
    pub fn assemble(&self, source: &dyn PageSource, options: &ConvertOptions) -> Result<Document> {
        let pages = source.pages()?;
        let assembler = DocumentAssembler::with_options(options.parse.clone());
        let mut document = assembler.assemble(pages.as_slice());
        document.metadata.source = Some(source.describe());
        Ok(document)
    }

    /// Convert `source` and store the result as `<artifact_stem>.<ext>`.
    ///
    /// Any failure (reading pages, rendering, storing) fails the whole
    /// conversion; nothing partial is stored.
    pub fn convert(
        &self,
        source: &dyn PageSource,
        artifact_stem: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let document = self.assemble(source, options)?;
        self.convert_document(&document, artifact_stem, options)
    }

    /// Render an assembled document and store it.
    pub fn convert_document(
        &self,
        document: &Document,
        artifact_stem: &str,
        options: &ConvertOptions,
    ) -> Result<ConvertResult> {
        let stem = artifact_stem.trim();
        if stem.is_empty() {
            return Err(Error::Storage("artifact name is empty".to_string()));
        }

        let render = &options.render;
        render.page_selection.validate(document.page_count())?;

        let converter = self.registry.get(options.output_format)?;
        let bytes = converter.render(document, render)?;

        let name = format!("{}.{}", stem, converter.extension());
        let locator = self.store.put(&name, &bytes)?;
        log::info!(
            "converted {} page(s) to {} ({} bytes) via {} store",
            document.page_count(),
            name,
            bytes.len(),
            self.store.name()
        );

        let mut result = ConvertResult::new(locator, document.metadata.clone())
            .with_mime_type(converter.mime_type())
            .with_size(bytes.len());
        if render.collect_stats {
            result = result.with_stats(ExtractionStats::from_document(
                document,
                &render.page_selection,
            ));
        }
        Ok(result)
    }
}
