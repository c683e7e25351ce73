// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch rendering against a stand-in OpenSCAD

mod common;

use anyhow::Result;
use scadkit::render::{assembly, with_fn};
use scadkit::{render_tasks, Node, RenderOptions, RenderStatus, RenderTask, Vec3};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn cube(size: f64) -> Node {
    Node::cube(Vec3::new(size, size, size))
}

#[test]
fn scripts_only_without_renderer() -> Result<()> {
    let dir = TempDir::new()?;
    let options = RenderOptions::new().with_output_dir(dir.path());

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.0), "a"),
            RenderTask::new(cube(2.0), "parts/b"),
        ],
        &options,
    )?;

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert_eq!(outcome.status, RenderStatus::ScriptOnly);
        assert_eq!(outcome.elapsed, Duration::ZERO);
        assert!(outcome.path.is_absolute());
    }
    assert_eq!(
        fs::read_to_string(dir.path().join("a.scad"))?,
        cube(1.0).to_scad()
    );
    assert!(dir.path().join("parts/b.scad").is_file());
    assert!(!dir.path().join("a.3mf").exists());
    Ok(())
}

#[test]
fn last_task_for_a_target_wins() -> Result<()> {
    let dir = TempDir::new()?;
    let options = RenderOptions::new().with_output_dir(dir.path());

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.0), "x"),
            RenderTask::new(cube(2.0), "y"),
            RenderTask::new(cube(3.0), "x"),
        ],
        &options,
    )?;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("x.scad"))?,
        cube(3.0).to_scad()
    );
    Ok(())
}

#[test]
fn include_filter_limits_the_batch() -> Result<()> {
    let dir = TempDir::new()?;
    let options = RenderOptions::new()
        .with_output_dir(dir.path())
        .with_include_filter("lid$")?;

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.0), "box_lid"),
            RenderTask::new(cube(2.0), "box_base"),
        ],
        &options,
    )?;

    assert_eq!(outcomes.len(), 1);
    assert!(dir.path().join("box_lid.scad").is_file());
    assert!(!dir.path().join("box_base.scad").exists());
    Ok(())
}

#[test]
fn dotted_targets_get_their_own_files() -> Result<()> {
    let dir = TempDir::new()?;
    let options = RenderOptions::new().with_output_dir(dir.path());

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.5), "part_1.5"),
            RenderTask::new(cube(1.6), "part_1.6"),
        ],
        &options,
    )?;

    assert_eq!(outcomes.len(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("part_1.5.scad"))?,
        cube(1.5).to_scad()
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("part_1.6.scad"))?,
        cube(1.6).to_scad()
    );
    assert!(!dir.path().join("part_1.scad").exists());
    Ok(())
}

#[test]
fn empty_batch_is_not_an_error() -> Result<()> {
    let outcomes = render_tasks(Vec::new(), &RenderOptions::new())?;
    assert!(outcomes.is_empty());
    Ok(())
}

#[test]
fn helpers_feed_the_pipeline() -> Result<()> {
    let dir = TempDir::new()?;
    let parts = vec![
        RenderTask::new(cube(1.0), "left"),
        RenderTask::new(cube(1.0), "right").at(Vec3::new(5.0, 0.0, 0.0)),
    ];
    let mut tasks = parts.clone();
    tasks.push(assembly(&parts, "both"));

    let options = RenderOptions::new().with_output_dir(dir.path());
    let outcomes = render_tasks(with_fn(32, tasks), &options)?;
    assert_eq!(outcomes.len(), 3);

    let script = fs::read_to_string(dir.path().join("both.scad"))?;
    assert!(script.contains("$fn = 32;"));
    assert!(script.contains("translate(v = [5, 0, 0])"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn rendered_container_gets_the_task_name() -> Result<()> {
    let dir = TempDir::new()?;
    let fixture = dir.path().join("fixture.3mf");
    common::write_3mf_fixture(&fixture)?;
    let fake = common::FakeOpenscad::new(dir.path(), Some(&fixture))?;

    let out = dir.path().join("build");
    let options = RenderOptions::new()
        .with_output_dir(&out)
        .with_renderer(Some(fake.renderer.clone()))
        .with_parallelism(2);

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.0), "plate"),
            RenderTask::new(cube(2.0), "parts/post"),
        ],
        &options,
    )?;

    assert_eq!(fake.calls(), 2);
    assert!(outcomes.iter().all(|o| o.status == RenderStatus::Rendered));

    let model = common::read_model_entry(&out.join("plate.3mf"))?;
    assert!(model.contains(r#"<metadata name="Title">plate</metadata>"#));
    assert!(!model.contains("OpenSCAD Model"));

    let nested = common::read_model_entry(&out.join("parts/post.3mf"))?;
    assert!(nested.contains(r#"<object name="post"/>"#));
    assert!(out.join("plate.png").is_file());
    Ok(())
}

#[cfg(unix)]
#[test]
fn broken_container_fails_the_task() -> Result<()> {
    let dir = TempDir::new()?;
    let fake = common::FakeOpenscad::new(dir.path(), None)?;
    let options = RenderOptions::new()
        .with_output_dir(dir.path().join("build"))
        .with_renderer(Some(fake.renderer.clone()));

    let outcomes = render_tasks(vec![RenderTask::new(cube(1.0), "plate")], &options)?;
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].status, RenderStatus::Failed);
    assert_eq!(outcomes[0].elapsed, Duration::ZERO);
    Ok(())
}

#[cfg(unix)]
#[test]
fn container_is_left_alone_unless_requested() -> Result<()> {
    let dir = TempDir::new()?;
    let fake = common::FakeOpenscad::new(dir.path(), None)?;
    let out = dir.path().join("build");
    let options = RenderOptions::new()
        .with_output_dir(&out)
        .with_renderer(Some(fake.renderer.clone()))
        .with_file_types([".stl"]);

    let outcomes = render_tasks(vec![RenderTask::new(cube(1.0), "plate")], &options)?;
    assert_eq!(outcomes[0].status, RenderStatus::Rendered);
    assert!(out.join("plate.stl").is_file());
    assert!(!out.join("plate.3mf").exists());
    Ok(())
}

#[cfg(unix)]
#[test]
fn renderer_failure_does_not_stop_the_batch() -> Result<()> {
    let dir = TempDir::new()?;
    let fake = common::FakeOpenscad::failing(dir.path())?;
    let out = dir.path().join("build");
    let options = RenderOptions::new()
        .with_output_dir(&out)
        .with_renderer(Some(fake.renderer.clone()));

    let outcomes = render_tasks(
        vec![
            RenderTask::new(cube(1.0), "a"),
            RenderTask::new(cube(2.0), "b"),
            RenderTask::new(cube(3.0), "c"),
        ],
        &options,
    )?;

    assert_eq!(fake.calls(), 3);
    assert_eq!(outcomes.len(), 3);
    for outcome in &outcomes {
        assert_eq!(outcome.status, RenderStatus::Failed);
        assert_eq!(outcome.elapsed, Duration::ZERO);
    }
    // Scripts are written before the renderer runs
    assert!(out.join("c.scad").is_file());
    Ok(())
}
