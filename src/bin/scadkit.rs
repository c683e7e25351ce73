// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadkit demo: a small bracket set built with the composer and batch rendered

use anyhow::{Context, Result};
use clap::Parser;
use scadkit::cli::{init_logging, RenderArgs, Reporter};
use scadkit::render::{assembly, render_tasks, with_fn};
use scadkit::transform::{mirror_x, rotate, translate, translate_z};
use scadkit::{Node, RenderCache, RenderTask, Vec3};

#[derive(Parser)]
#[command(name = "scadkit")]
#[command(about = "Build and render a demo bracket set through OpenSCAD", long_about = None)]
struct Cli {
    #[command(flatten)]
    render: RenderArgs,

    /// Global $fn resolution for curved surfaces
    #[arg(long = "fn", default_value_t = 64)]
    fn_: u32,

    /// Plate thickness in millimeters
    #[arg(long, default_value_t = 3.0)]
    thickness: f64,

    /// Cache the post mesh as STL and reuse it across runs
    #[arg(long)]
    cache: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.render.verbose);

    if let Err(e) = run(cli) {
        Reporter::report_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let session = cli.render.resolve("build")?;

    let plate = Node::cube(Vec3::new(40.0, 20.0, cli.thickness));
    let mut post = Node::cylinder(20.0, 4.0, 0);

    if cli.cache {
        if let Some(renderer) = session.renderer.clone() {
            let mut cache = RenderCache::default();
            cache.use_stl_cache(renderer, session.output_dir.join("cache"));
            let cached = cache.cache_to_stl([(post.clone(), "post")])?;
            post = cached
                .get("post")
                .cloned()
                .context("cache returned no post")?;
        } else {
            Reporter::report_warning("No renderer available, --cache ignored");
        }
    }

    // Posts sit on the plate, the right one is the mirror image of the left
    let left = translate((8.0, 10.0, cli.thickness))?;
    let right = &mirror_x() + &translate((32.0, 10.0, cli.thickness))?;
    let tilted = rotate([0.0, -15.0])? + translate_z(cli.thickness);

    let mut tasks = vec![
        RenderTask::new(plate.clone(), "plate"),
        RenderTask::new(post.clone(), "post"),
        RenderTask::new(tilted.apply(post.clone()), "post_tilted"),
    ];
    let parts = vec![
        RenderTask::new(plate, "plate"),
        RenderTask::new(left.apply(post.clone()), "post_left"),
        RenderTask::new(right.apply(post), "post_right"),
    ];
    tasks.push(assembly(&parts, "bracket"));
    tasks.extend(parts.into_iter().skip(1));

    let outcomes = render_tasks(with_fn(cli.fn_, tasks), &session.options)?;
    Reporter::report_outcomes(&outcomes);

    Ok(())
}
