use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn facetglow(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_facetglow"))
        .env("FACETGLOW_CONFIG_DIR", config_dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .expect("failed to run facetglow")
}

fn json_lines(output: &Output) -> Vec<Value> {
    assert!(
        output.status.success(),
        "facetglow failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn float(value: &Value) -> f64 {
    value.as_f64().unwrap()
}

#[test]
fn simulate_one_second_turns_by_rotation_speed() {
    let root = TempDir::new().unwrap();
    let output = facetglow(
        root.path(),
        &[
            "simulate",
            "--frames",
            "60",
            "--fps",
            "60",
            "--pointer",
            "0.5,0.5",
            "--every",
            "30",
        ],
    );
    let frames = json_lines(&output);
    assert_eq!(frames.len(), 3);

    let last = frames.last().unwrap();
    assert_eq!(last["frame"], 59);
    assert!((float(&last["angle"]) - 0.2).abs() < 1e-4);
    assert!((float(&last["elapsed"]) - 1.0).abs() < 1e-4);

    // pointer at the centre pushes the distortion toward its cap
    let distortion = float(&last["distortion"]);
    assert!(distortion > 0.15 && distortion <= 0.2);

    let uniforms = &last["uniforms"];
    assert_eq!(float(&uniforms["uEdgeThickness"]), 5.0);
    assert_eq!(uniforms["uType"], 0);
    assert_eq!(uniforms["uUvScale"], serde_json::json!([1.0, 1.0]));
    assert!(uniforms.get("uTexture").is_none());
    assert!(last.get("outline").is_none());
    assert!((float(&last["bloom"]["intensity"]) - 1.0).abs() < 1e-6);
}

#[test]
fn zero_rotation_speed_override_keeps_identity() {
    let root = TempDir::new().unwrap();
    let output = facetglow(
        root.path(),
        &["simulate", "--frames", "10", "--set", "rotation_speed=0"],
    );
    let frames = json_lines(&output);
    assert_eq!(frames.len(), 10);
    for frame in &frames {
        assert_eq!(float(&frame["angle"]), 0.0);
        assert_eq!(frame["uniforms"]["uRotation"], serde_json::json!([0.0, 0.0, 0.0, 1.0]));
    }
}

#[test]
fn out_of_range_override_is_rejected() {
    let root = TempDir::new().unwrap();
    let output = facetglow(
        root.path(),
        &["simulate", "--frames", "1", "--set", "border_alpha=4"],
    );
    assert!(!output.status.success());

    let output = facetglow(
        root.path(),
        &["simulate", "--frames", "1", "--set", "no_such_knob=1"],
    );
    assert!(!output.status.success());
}

#[test]
fn vanishing_frame_rate_fails_cleanly() {
    let root = TempDir::new().unwrap();
    for args in [
        &["simulate", "--frames", "1", "--fps", "1e-20"][..],
        &["simulate", "--frames", "1", "--fps", "1e-20", "--realtime"][..],
    ] {
        let output = facetglow(root.path(), args);
        assert!(!output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(!stderr.contains("panicked"), "{stderr}");
        assert!(stderr.contains("fps"), "{stderr}");
    }

    let settings_file = root.path().join("slow.toml");
    fs::write(&settings_file, "[simulation]\nfps = 1e-20\n").unwrap();
    let output = facetglow(
        root.path(),
        &["simulate", "--config", settings_file.to_str().unwrap()],
    );
    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));
}

#[test]
fn realtime_run_paces_frames() {
    let root = TempDir::new().unwrap();
    let output = facetglow(
        root.path(),
        &["simulate", "--frames", "3", "--fps", "200", "--realtime"],
    );
    let frames = json_lines(&output);
    assert_eq!(frames.len(), 3);
    assert!(float(&frames[2]["elapsed"]) > 0.0);
}

#[test]
fn outline_run_reports_both_surfaces() {
    let root = TempDir::new().unwrap();
    let output = facetglow(root.path(), &["simulate", "--frames", "3", "--outline"]);
    let frames = json_lines(&output);
    let last = frames.last().unwrap();
    assert_eq!(last["uniforms"]["uType"], 0);
    assert_eq!(last["outline"]["uType"], 1);
    assert_eq!(last["uniforms"]["uRotation"], last["outline"]["uRotation"]);
}

#[test]
fn background_image_sets_cover_scale() {
    let root = TempDir::new().unwrap();
    let image_path = root.path().join("bg.png");
    image::RgbImage::new(200, 100).save(&image_path).unwrap();

    let output = facetglow(
        root.path(),
        &[
            "simulate",
            "--frames",
            "1",
            "--size",
            "800x600",
            "--background",
            image_path.to_str().unwrap(),
        ],
    );
    let frames = json_lines(&output);
    let uniforms = &frames[0]["uniforms"];
    let scale = uniforms["uUvScale"].as_array().unwrap();
    assert!((float(&scale[0]) - 2.0 / 3.0).abs() < 1e-4);
    assert!((float(&scale[1]) - 1.0).abs() < 1e-6);
    assert_eq!(uniforms["uTexture"], 1);
    assert_eq!(uniforms["uResolution"], serde_json::json!([800.0, 600.0]));
}

#[test]
fn mesh_json_reports_facet_attributes() {
    let root = TempDir::new().unwrap();
    let output = facetglow(root.path(), &["mesh", "--json", "--shell-scale", "1.05"]);
    let dumps = json_lines(&output);
    let dump = &dumps[0];
    assert_eq!(dump["vertices"], 240);
    assert_eq!(dump["triangles"], 80);

    let attributes = &dump["attributes"];
    assert_eq!(attributes["aBaryCoord"]["item_size"], 3);
    assert_eq!(attributes["aCenter"]["data"].as_array().unwrap().len(), 720);
    assert_eq!(attributes["position"]["data"].as_array().unwrap().len(), 720);
    assert_eq!(dump["shell"]["shares_attributes"], true);
}

#[test]
fn knobs_lists_panel_ranges() {
    let root = TempDir::new().unwrap();
    let output = facetglow(root.path(), &["knobs"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("mainSettings:"));
    assert!(stdout.contains("bloomSettings:"));
    assert!(stdout.contains("edge_thickness"));
    assert!(stdout.contains("uEdgeThickness"));
}

#[test]
fn config_init_then_simulate_uses_the_file() {
    let root = TempDir::new().unwrap();
    let config_dir = root.path().join("config");

    let output = facetglow(&config_dir, &["config", "init"]);
    assert!(output.status.success());
    let settings_file = config_dir.join("settings.toml");
    assert!(settings_file.exists());

    // second init without --force refuses to clobber
    assert!(!facetglow(&config_dir, &["config", "init"]).status.success());

    let output = facetglow(&config_dir, &["config", "where"]);
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("present"));

    let contents = fs::read_to_string(&settings_file).unwrap();
    fs::write(
        &settings_file,
        contents.replace("edge_thickness = 5.0", "edge_thickness = 7.5"),
    )
    .unwrap();
    let frames = json_lines(&facetglow(&config_dir, &["simulate", "--frames", "1"]));
    assert_eq!(float(&frames[0]["uniforms"]["uEdgeThickness"]), 7.5);
}
