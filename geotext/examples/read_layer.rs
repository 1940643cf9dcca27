//! Reads a GML document or WFS response and prints the shapes of the layer.
//!
//! ```shell
//! cargo run --example read_layer -- geotext/test-data/parcels.gml MultiSurfacePropertyType
//! ```

use std::path::Path;

use geotext::geotext_types::Geometry;
use geotext::gml::{GmlGeometryType, GmlProvider, MultiGeometryMode};
use geotext::source::FileSource;
use geotext::{Feature, GeoTextError};
use log::info;

fn main() -> Result<(), GeoTextError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        eprintln!("Usage: read_layer <file.gml> [geometry property type]");
        std::process::exit(1);
    };

    let mut builder = GmlProvider::builder().with_multi_geometries(MultiGeometryMode::PreserveMulti);
    if let Some(hint) = args.next() {
        builder = builder.with_geometry_type(hint.parse::<GmlGeometryType>()?);
    }
    let provider = builder.build()?;

    let path = Path::new(&path);
    let folder = path.parent().unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or(GeoTextError::NotFound)?;

    let layer = provider.populate_from(&FileSource::new(folder), &file_name)?;
    info!(
        "Layer {} of type {} has {} shapes",
        layer.name(),
        layer.geometry_type(),
        layer.len()
    );

    if let Some(envelope) = layer.envelope() {
        info!(
            "Extent: [{}, {}, {}, {}]",
            envelope.x_min(),
            envelope.y_min(),
            envelope.x_max(),
            envelope.y_max()
        );
    }

    for shape in layer.shapes() {
        let mut attributes: Vec<_> = shape.attributes().iter().collect();
        attributes.sort();
        println!(
            "{} {:?} {}",
            shape.geometry().geometry_type(),
            attributes,
            geotext::wkt::to_wkt(shape.geometry())
        );
    }

    Ok(())
}
