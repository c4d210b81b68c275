//! Suture CLI - boundary-loop stitching command-line tool.
//!
//! Usage: suture <COMMAND> [OPTIONS] <INPUT> [OUTPUT]
//!
//! Run `suture --help` for available commands.

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use suture::algo::classify::{self, LongestAsBody, LoopClassifier, NearestToTarget};
use suture::algo::relax::{relax_seam_with_progress, RelaxOptions};
use suture::algo::{bridge, Progress};
use suture::io;
use suture::mesh::{EditMesh, VertexId};
use suture::session::{EditSession, MeshEditingContext};

#[derive(Parser)]
#[command(name = "suture")]
#[command(author, version, about = "Boundary-loop stitching CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file
        input: PathBuf,
    },

    /// Stitch the two open boundary loops of a mesh and relax the seam
    Stitch {
        /// Input mesh file
        input: PathBuf,

        /// Output mesh file
        output: PathBuf,

        /// Number of relaxation iterations
        #[arg(short, long, default_value = "3")]
        iterations: usize,

        /// Interpolation factor toward the neighbor average (0.0 to 1.0)
        #[arg(short, long, default_value = "0.5")]
        factor: f64,

        /// Expected body loop size; the closest loop becomes the attachment
        /// target (default: the longest loop)
        #[arg(long)]
        target_loop_size: Option<usize>,

        /// Bridge only, skip the relaxation pass
        #[arg(long)]
        no_relax: bool,

        /// Use single-threaded execution (for benchmarking)
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }

        Commands::Stitch {
            input,
            output,
            iterations,
            factor,
            target_loop_size,
            no_relax,
            sequential,
        } => {
            cmd_stitch(
                &input,
                &output,
                iterations,
                factor,
                target_loop_size,
                no_relax,
                sequential,
            )?;
        }
    }

    Ok(())
}

/// Create a progress reporter that displays a progress bar on the terminal.
fn create_progress() -> Progress {
    Progress::new(|current, total, message| {
        if total == 0 {
            return;
        }

        let percent = if current >= total {
            100
        } else {
            (current * 100) / total
        };

        let bar_width = 30;
        let filled = (percent * bar_width) / 100;

        // Carriage return overwrites the line in place
        eprint!(
            "\r[{}{}] {:3}% {}",
            "=".repeat(filled),
            " ".repeat(bar_width - filled),
            percent,
            message
        );
        let _ = std::io::stderr().flush();

        if current >= total {
            eprintln!();
        }
    })
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh: EditMesh = io::load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", mesh.num_vertices());
    println!("Edges: {}", mesh.num_edges());
    println!("Faces: {}", mesh.num_faces());

    let wire = mesh.wire_edges().count();
    if wire > 0 {
        println!("Wire edges: {}", wire);
    }

    // Bounding box
    if let Some((min, max)) = mesh.bounding_box() {
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let diag = max - min;
        println!("Dimensions: {:.3} x {:.3} x {:.3}", diag.x, diag.y, diag.z);
    }

    // Boundary census
    let selected = mesh.select_boundary();
    if selected == 0 {
        println!("Topology: Closed (no boundary)");
    } else {
        let session = EditSession::new(&mut mesh);
        let mut loops = classify::trace_selected_loops(&session);
        loops.sort_by_key(|l| std::cmp::Reverse(l.len()));

        println!(
            "Topology: Open ({} boundary vertices in {} loops)",
            selected,
            loops.len()
        );
        for (i, lp) in loops.iter().enumerate() {
            println!("  Loop {}: {} vertices", i, lp.len());
        }
    }

    Ok(())
}

fn cmd_stitch(
    input: &PathBuf,
    output: &PathBuf,
    iterations: usize,
    factor: f64,
    target_loop_size: Option<usize>,
    no_relax: bool,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh: EditMesh = io::load(input)?;

    println!(
        "Loaded: {} vertices, {} faces",
        mesh.num_vertices(),
        mesh.num_faces()
    );

    let selected = mesh.select_boundary();
    println!("Selected {} boundary vertices", selected);

    let classifier: Box<dyn LoopClassifier<u32>> = match target_loop_size {
        Some(target) => Box::new(NearestToTarget { target }),
        None => Box::new(LongestAsBody),
    };

    let start = Instant::now();
    {
        let mut session = EditSession::new(&mut mesh);

        let loops = classify::trace_selected_loops(&session);
        println!("Found {} boundary loops", loops.len());

        let classification = classifier.classify(loops);
        if classification.is_degenerate() {
            println!("Nothing to stitch (need two boundary loops)");
            return Ok(());
        }

        println!(
            "Stitching {} vertices to body...",
            classification.face_loop.len()
        );
        let report = bridge::bridge_loops(
            &mut session,
            &classification.body_loop,
            &classification.face_loop,
        );
        println!(
            "Bridged: {} edges added, {} already present",
            report.edges_added, report.edges_skipped
        );

        if !no_relax {
            let options = RelaxOptions::default()
                .with_iterations(iterations)
                .with_factor(factor)
                .with_parallel(!sequential);

            let seam: Vec<VertexId<u32>> = classification
                .body_loop
                .iter()
                .chain(classification.face_loop.iter())
                .copied()
                .collect();

            let mode = if sequential { "sequential" } else { "parallel" };
            println!(
                "Relaxing seam ({} iterations, factor={}, {})...",
                iterations, factor, mode
            );
            let progress = create_progress();
            relax_seam_with_progress(&mut session, &seam, &options, &progress);
        }

        session.commit()?;
        println!("Mesh integration complete.");
    }
    let elapsed = start.elapsed();

    io::save(&mesh, output)?;
    println!("Saved: {} ({:.2?})", output.display(), elapsed);

    Ok(())
}
