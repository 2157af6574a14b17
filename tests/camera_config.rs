use std::io::Write;
use std::sync::Mutex;

use tempfile::Builder;

use remote_vision_source::config::{CameraConfiguration, CameraType};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    for key in ["REMOTE_CAMERA_PATH", "REMOTE_CAMERA_FOV"] {
        std::env::remove_var(key);
    }
}

#[test]
fn loads_json_config_with_calibrations() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = Builder::new().suffix(".json").tempfile().expect("temp config");
    let json = r#"{
        "unique_name": "front-remote",
        "nickname": "Front",
        "path": "tcp://10.0.0.5:5555/cam0",
        "FOV": 82.5,
        "camera_type": "remote_stream",
        "calibrations": [
            {
                "resolution": { "width": 1280, "height": 720 },
                "camera_intrinsics": [900, 0, 640, 0, 900, 360, 0, 0, 1],
                "dist_coeffs": [0.1, -0.05, 0, 0, 0]
            },
            {
                "resolution": { "width": 640, "height": 480 }
            }
        ]
    }"#;
    file.write_all(json.as_bytes()).expect("write config");

    let cfg = CameraConfiguration::load(file.path()).expect("load config");

    assert_eq!(cfg.unique_name, "front-remote");
    assert_eq!(cfg.nickname, "Front");
    assert_eq!(cfg.path, "tcp://10.0.0.5:5555/cam0");
    assert_eq!(cfg.fov, 82.5);
    assert_eq!(cfg.camera_type, CameraType::RemoteStream);
    assert_eq!(cfg.calibrations.len(), 2);
    assert_eq!(cfg.primary_calibration().unwrap().resolution.width, 1280);
    assert!(cfg.calibrations[1].camera_intrinsics.is_empty());
}

#[test]
fn loads_toml_config_and_applies_env_overrides() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp config");
    let toml = r#"
        path = "tcp://10.0.0.5:5555/cam0"
        fov = 70.0
    "#;
    file.write_all(toml.as_bytes()).expect("write config");

    std::env::set_var("REMOTE_CAMERA_PATH", "stub://1280x720/rear");
    std::env::set_var("REMOTE_CAMERA_FOV", "95");

    let cfg = CameraConfiguration::load(file.path()).expect("load config");
    assert_eq!(cfg.path, "stub://1280x720/rear");
    assert_eq!(cfg.fov, 95.0);
    assert!(cfg.calibrations.is_empty());

    clear_env();
}

#[test]
fn rejects_non_numeric_fov_override() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = Builder::new().suffix(".toml").tempfile().expect("temp config");
    file.write_all(b"path = \"tcp://cam/front\"\n")
        .expect("write config");

    std::env::set_var("REMOTE_CAMERA_FOV", "wide");
    let err = CameraConfiguration::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("REMOTE_CAMERA_FOV"));

    clear_env();
}

#[test]
fn missing_path_is_a_parse_error() {
    let _guard = ENV_LOCK.lock().unwrap();
    clear_env();

    let mut file = Builder::new().suffix(".json").tempfile().expect("temp config");
    file.write_all(br#"{"fov": 70}"#).expect("write config");

    let err = CameraConfiguration::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("invalid camera config"));
}
