use std::fs;
use std::path::{Path, PathBuf};

use placeholder_image::ImagePlaceholderBuilder;
use sha2::{Digest, Sha256};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("placeholder_image_golden_{}", name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

// Only captionless, rectangle-free renders are deterministic.
#[test]
fn golden_empty_render_matches_fixture() {
    let dir = scratch_dir("empty");
    let path = ImagePlaceholderBuilder::new()
        .size(256, 128)
        .colors("#336699", None)
        .render("empty", "")
        .generate(Some("golden"), Some(&dir))
        .expect("generate");

    // Digest the decoded pixels, not the PNG bytes, so encoder settings
    // don't invalidate the fixture.
    let pixels = image::open(&path).expect("decode").to_rgb8().into_raw();
    let digest = hex::encode(Sha256::digest(&pixels));

    let expected_path = golden_path("empty_256x128_336699.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !Path::new(&expected_path).exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim());
}
