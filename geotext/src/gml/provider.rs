use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::{Deserialize, Serialize};

use crate::error::GeoTextError;
use crate::gml::factory::{GeometryFactory, ShapeReader};
use crate::gml::{detect, GmlGeometryType};
use crate::shape::ShapeLayer;
use crate::source::TextSource;

/// What the caller knows about the layer in advance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerSchema {
    /// Layer name. If not set, the first `gml:name` of the document is used.
    pub name: Option<String>,
    /// Geometry type hint. If not set, the type is detected from the document.
    pub geometry_type: Option<GmlGeometryType>,
    /// Attributes to keep. Empty list keeps all simple-valued properties.
    pub fields: Vec<String>,
}

/// How `MultiCurve` and `MultiSurface` layers are read.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MultiGeometryMode {
    /// Every member curve or surface becomes a separate shape.
    #[default]
    AlwaysCollapse,
    /// Every multi-geometry becomes one shape.
    PreserveMulti,
}

impl Display for MultiGeometryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            MultiGeometryMode::AlwaysCollapse => "always-collapse",
            MultiGeometryMode::PreserveMulti => "preserve-multi",
        })
    }
}

impl FromStr for MultiGeometryMode {
    type Err = GeoTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "always-collapse" => Ok(MultiGeometryMode::AlwaysCollapse),
            "preserve-multi" => Ok(MultiGeometryMode::PreserveMulti),
            _ => Err(GeoTextError::Configuration(format!(
                "unknown multi-geometry mode: {s}"
            ))),
        }
    }
}

/// Options of the GML reader.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GmlOptions {
    /// How multi-curves and multi-surfaces are read.
    pub multi_geometries: MultiGeometryMode,
    /// Maximum number of nested elements in the document.
    pub max_depth: usize,
    /// Skip features with invalid geometries instead of failing the whole document.
    pub skip_invalid_features: bool,
}

impl Default for GmlOptions {
    fn default() -> Self {
        Self {
            multi_geometries: MultiGeometryMode::default(),
            max_depth: geotext_wkt::DEFAULT_MAX_DEPTH,
            skip_invalid_features: false,
        }
    }
}

/// Reads GML documents into [`ShapeLayer`]s.
///
/// The provider does not hold any state between calls, so one provider can read any number of documents.
#[derive(Debug, Clone, Default)]
pub struct GmlProvider {
    schema: LayerSchema,
    options: GmlOptions,
}

impl GmlProvider {
    /// Creates a new provider.
    pub fn new(schema: LayerSchema, options: GmlOptions) -> Self {
        Self { schema, options }
    }

    /// Creates a builder for the provider.
    pub fn builder() -> GmlProviderBuilder {
        GmlProviderBuilder::default()
    }

    /// Layer schema.
    pub fn schema(&self) -> &LayerSchema {
        &self.schema
    }

    /// Reader options.
    pub fn options(&self) -> &GmlOptions {
        &self.options
    }

    /// Name of the layer in the document.
    ///
    /// Name from the schema takes precedence over the first non-blank `gml:name` element of the document.
    pub fn layer_name(&self, xml: &str) -> Result<String, GeoTextError> {
        if let Some(name) = &self.schema.name {
            return Ok(name.clone());
        }

        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut name: Option<String> = None;
        loop {
            match reader.read_event()? {
                Event::Start(e) if e.name().as_ref() == b"gml:name" => name = Some(String::new()),
                Event::Text(e) => {
                    if let Some(name) = &mut name {
                        name.push_str(&e.unescape()?);
                    }
                }
                Event::CData(e) => {
                    if let Some(name) = &mut name {
                        name.push_str(&String::from_utf8_lossy(&e));
                    }
                }
                Event::End(e) if e.name().as_ref() == b"gml:name" => {
                    match name.take() {
                        Some(name) if !name.trim().is_empty() => return Ok(name.trim().to_string()),
                        _ => {}
                    }
                }
                Event::Eof => return Err(GeoTextError::MissingLayerName),
                _ => {}
            }
        }
    }

    /// Geometry type of the document: the schema hint, or the detected type.
    pub fn geometry_type(&self, xml: &str) -> GmlGeometryType {
        self.schema.geometry_type.unwrap_or_else(|| detect(xml))
    }

    /// Returns a streaming reader of the shapes of the document.
    pub fn shapes<'a>(&'a self, xml: &'a str) -> ShapeReader<'a> {
        self.reader_for(xml, self.geometry_type(xml))
    }

    fn reader_for<'a>(&'a self, xml: &'a str, geometry_type: GmlGeometryType) -> ShapeReader<'a> {
        let factory = GeometryFactory::for_type(geometry_type, self.options.multi_geometries);
        debug!("Reading {geometry_type} layer with {factory:?} factory");

        ShapeReader::new(xml, factory, &self.schema.fields, self.options)
    }

    /// Reads all shapes of the document into a layer.
    ///
    /// Fails on the first error, no partial layer is returned.
    pub fn populate(&self, xml: &str) -> Result<ShapeLayer, GeoTextError> {
        let name = self.layer_name(xml)?;
        let geometry_type = self.geometry_type(xml);

        let mut reader = self.reader_for(xml, geometry_type);
        let shapes = reader.by_ref().collect::<Result<Vec<_>, _>>()?;
        debug!("Layer {name} populated with {} shapes", shapes.len());

        Ok(ShapeLayer::new(
            name,
            geometry_type,
            shapes,
            reader.envelope(),
        ))
    }

    /// Loads the document from the source and reads it into a layer.
    pub fn populate_from(
        &self,
        source: &dyn TextSource,
        key: &str,
    ) -> Result<ShapeLayer, GeoTextError> {
        let xml = source.load(key)?;
        self.populate(&xml)
    }
}

/// Constructor for a [`GmlProvider`].
///
/// ```
/// use geotext::gml::{GmlGeometryType, GmlProviderBuilder, MultiGeometryMode};
///
/// let provider = GmlProviderBuilder::default()
///     .with_layer_name("roads")
///     .with_geometry_type(GmlGeometryType::MultiCurve)
///     .with_multi_geometries(MultiGeometryMode::PreserveMulti)
///     .with_fields(["id", "class"])
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(provider.schema().fields, ["id", "class"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GmlProviderBuilder {
    name: Option<String>,
    geometry_type: Option<GmlGeometryType>,
    fields: Vec<String>,
    options: GmlOptions,
}

impl GmlProviderBuilder {
    /// Sets the layer name instead of reading it from the document.
    pub fn with_layer_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the geometry type instead of detecting it from the document.
    pub fn with_geometry_type(mut self, geometry_type: GmlGeometryType) -> Self {
        self.geometry_type = Some(geometry_type);
        self
    }

    /// Keeps only the given attributes.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Sets how multi-curves and multi-surfaces are read.
    pub fn with_multi_geometries(mut self, mode: MultiGeometryMode) -> Self {
        self.options.multi_geometries = mode;
        self
    }

    /// Sets the maximum element nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Skip features with invalid geometries instead of failing.
    pub fn with_lenient_features(mut self) -> Self {
        self.options.skip_invalid_features = true;
        self
    }

    /// Replaces all reader options.
    pub fn with_options(mut self, options: GmlOptions) -> Self {
        self.options = options;
        self
    }

    /// Consumes the builder and constructs the provider.
    ///
    /// # Errors
    ///
    /// Returns [`GeoTextError::Configuration`] if the maximum depth is zero.
    pub fn build(self) -> Result<GmlProvider, GeoTextError> {
        let Self {
            name,
            geometry_type,
            fields,
            options,
        } = self;

        if options.max_depth == 0 {
            return Err(GeoTextError::Configuration(
                "maximum nesting depth must be positive".into(),
            ));
        }

        Ok(GmlProvider::new(
            LayerSchema {
                name,
                geometry_type,
                fields,
            },
            options,
        ))
    }
}
