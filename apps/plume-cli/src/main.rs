use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use plume_geometry::{Cube, Icosphere, MeshBuffers, Square};
use plume_scene::Controls;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plume-cli", about = "CLI tool for inspecting plume meshes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Cube,
    Icosphere,
    Square,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a mesh and print its counts or buffers
    Mesh {
        #[arg(value_enum)]
        shape: Shape,
        /// Center as x,y,z
        #[arg(long, default_value = "0,0,0")]
        center: String,
        /// Icosphere radius
        #[arg(long, default_value = "1.0")]
        radius: f32,
        /// Icosphere subdivision level
        #[arg(short, long, default_value = "5")]
        tesselations: u32,
        /// Dump positions, normals and indices as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate a controls file and print the clamped values
    Controls {
        path: PathBuf,
    },
}

fn parse_center(text: &str) -> anyhow::Result<Vec3> {
    let parts = text
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("invalid center {text:?}"))?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => bail!("center needs three components, got {}", parts.len()),
    }
}

fn build(shape: Shape, center: Vec3, radius: f32, tesselations: u32) -> MeshBuffers {
    match shape {
        Shape::Cube => Cube::new(center).build(),
        Shape::Icosphere => Icosphere::new(center, radius, tesselations).build(),
        Shape::Square => Square::new(center).build(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("plume-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("geometry: {}", plume_geometry::crate_info());
            println!("scene: {}", plume_scene::crate_info());
        }
        Commands::Mesh {
            shape,
            center,
            radius,
            tesselations,
            json,
        } => {
            let center = parse_center(&center)?;
            let mesh = build(shape, center, radius, tesselations);
            tracing::debug!(vertices = mesh.vertex_count(), "mesh built");

            if json {
                println!("{}", serde_json::to_string_pretty(&mesh)?);
            } else {
                println!(
                    "vertices={}, indices={}, triangles={}",
                    mesh.vertex_count(),
                    mesh.count(),
                    mesh.triangle_count()
                );
            }
        }
        Commands::Controls { path } => {
            let controls = Controls::load(&path)
                .with_context(|| format!("loading controls from {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&controls)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_center_ok() {
        assert_eq!(parse_center("2, 0,-1.5").unwrap(), Vec3::new(2.0, 0.0, -1.5));
    }

    #[test]
    fn parse_center_rejects_bad_input() {
        assert!(parse_center("1,2").is_err());
        assert!(parse_center("a,b,c").is_err());
    }

    #[test]
    fn build_dispatches_by_shape() {
        assert_eq!(build(Shape::Cube, Vec3::ZERO, 1.0, 0).count(), 36);
        assert_eq!(build(Shape::Square, Vec3::ZERO, 1.0, 0).count(), 6);
        assert_eq!(build(Shape::Icosphere, Vec3::ZERO, 1.0, 0).count(), 60);
    }
}
