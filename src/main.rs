use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
#[error("{0}: {1}")]
struct GraphLoadError(PathBuf, #[source] quadmap::osm::Error);

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find the shortest road path between two points,
    /// printed as a GeoJSON LineString
    Route {
        /// The path to the OSM file (.osm, .osm.gz or .osm.bz2)
        osm_file: PathBuf,

        /// Longitude of the start point
        start_lon: f64,

        /// Latitude of the start point
        start_lat: f64,

        /// Longitude of the end point
        end_lon: f64,

        /// Latitude of the end point
        end_lat: f64,
    },

    /// Plan the tile mosaic covering a viewport
    Raster {
        /// Upper-left longitude of the whole tiled region
        root_ullon: f64,

        /// Upper-left latitude of the whole tiled region
        root_ullat: f64,

        /// Lower-right longitude of the whole tiled region
        root_lrlon: f64,

        /// Lower-right latitude of the whole tiled region
        root_lrlat: f64,

        /// Upper-left longitude of the query box
        ullon: f64,

        /// Upper-left latitude of the query box
        ullat: f64,

        /// Lower-right longitude of the query box
        lrlon: f64,

        /// Lower-right latitude of the query box
        lrlat: f64,

        /// Viewport width, in pixels
        width: u32,

        /// Viewport height, in pixels
        height: u32,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    colog::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Route {
            osm_file,
            start_lon,
            start_lat,
            end_lon,
            end_lat,
        } => run_route(&osm_file, start_lon, start_lat, end_lon, end_lat),

        Command::Raster {
            root_ullon,
            root_ullat,
            root_lrlon,
            root_lrlat,
            ullon,
            ullat,
            lrlon,
            lrlat,
            width,
            height,
        } => {
            let bounds = quadmap::BBox {
                ullon: root_ullon,
                ullat: root_ullat,
                lrlon: root_lrlon,
                lrlat: root_lrlat,
            };
            let query = quadmap::BBox {
                ullon,
                ullat,
                lrlon,
                lrlat,
            };
            run_raster(bounds, query, width, height)
        }
    }
}

fn run_route(
    osm_file: &Path,
    start_lon: f64,
    start_lat: f64,
    end_lon: f64,
    end_lat: f64,
) -> Result<(), Box<dyn Error>> {
    let g = load_graph(osm_file)?;

    let query = quadmap::route::RouteQuery {
        start_lon,
        start_lat,
        end_lon,
        end_lat,
    };
    let path = quadmap::route::route(&g, &query)?;

    println!("{{");
    println!("  \"type\": \"FeatureCollection\",");
    println!("  \"features\": [");
    println!("    {{");
    println!("      \"type\": \"Feature\",");
    println!("      \"properties\": {{}},");

    println!("      \"geometry\": {{");
    println!("        \"type\": \"LineString\",");
    println!("        \"coordinates\": [");

    let mut nodes = path
        .iter()
        .filter_map(|&node_id| g.get_node(node_id))
        .peekable();
    while let Some(node) = nodes.next() {
        let suffix = if nodes.peek().is_some() { "," } else { "" };
        println!("          [{}, {}]{}", node.lon, node.lat, suffix);
    }

    println!("        ]");
    println!("      }}");
    println!("    }}");
    println!("  ]");
    println!("}}");

    Ok(())
}

fn run_raster(
    bounds: quadmap::BBox,
    query: quadmap::BBox,
    width: u32,
    height: u32,
) -> Result<(), Box<dyn Error>> {
    let tree = quadmap::QuadTree::new(bounds, quadmap::DEFAULT_MAX_DEPTH);

    match quadmap::raster::plan(&tree, &query, width, height) {
        Some(plan) => {
            println!("depth: {}", plan.depth);
            println!(
                "bounds: ul ({}, {}), lr ({}, {})",
                plan.bounds.ullon, plan.bounds.ullat, plan.bounds.lrlon, plan.bounds.lrlat
            );
            println!("size: {}x{} px", plan.width, plan.height);
            println!("tiles:");
            for row in plan.tiles.chunks((plan.width / quadmap::TILE_SIZE) as usize) {
                println!("  {}", row.join(" "));
            }
            Ok(())
        }
        None => Err("the query box does not intersect the tiled region".into()),
    }
}

fn load_graph<P: AsRef<Path>>(path: P) -> Result<quadmap::Graph, GraphLoadError> {
    let mut g = quadmap::Graph::default();
    let options = quadmap::osm::Options {
        road_types: quadmap::osm::DEFAULT_ROAD_TYPES,
        file_format: guess_file_format(path.as_ref()),
    };
    match quadmap::osm::add_features_from_file(&mut g, &options, path.as_ref()) {
        Ok(()) => Ok(g),
        Err(e) => Err(GraphLoadError(PathBuf::from(path.as_ref()), e)),
    }
}

fn guess_file_format(path: &Path) -> quadmap::osm::FileFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => quadmap::osm::FileFormat::XmlGz,
        Some("bz2") => quadmap::osm::FileFormat::XmlBz2,
        _ => quadmap::osm::FileFormat::Xml,
    }
}
