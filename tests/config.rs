use hog_descriptor::image::ImageU8;
use hog_descriptor::{
    load_params, AngularRange, BlockNorm, ConfigError, HogDescriptor, HogError, HogParams,
};
use std::fs;
use std::path::PathBuf;

fn temp_json(name: &str, contents: &str) -> PathBuf {
    let file = format!("hog-descriptor-{}-{name}.json", std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, contents).expect("write temp params");
    path
}

fn expect_invalid(params: HogParams, field: &str) {
    match HogDescriptor::new(params) {
        Err(ConfigError::InvalidParameter { name, .. }) => assert_eq!(name, field),
        Err(other) => panic!("expected invalid {field}, got {other}"),
        Ok(_) => panic!("expected invalid {field}, got an engine"),
    }
}

#[test]
fn canonical_configuration_builds() {
    let params = HogParams {
        blocksize: 16,
        cellsize: 8,
        stride: 8,
        binning: 9,
        angular_range: AngularRange::Unsigned,
        norm: BlockNorm::L2Hys,
        ..Default::default()
    };
    let hog = HogDescriptor::new(params.clone()).expect("valid");
    assert_eq!(hog.params(), &params);
}

#[test]
fn invalid_geometry_fails_construction() {
    expect_invalid(HogParams::default().with_binning(1), "binning");
    expect_invalid(HogParams::default().with_stride(7).with_binning(2), "stride");
    expect_invalid(
        HogParams::with_blocksize(12)
            .with_cellsize(6)
            .with_stride(8),
        "stride",
    );
    expect_invalid(
        HogParams {
            blocksize: 15,
            ..Default::default()
        },
        "blocksize",
    );
}

#[test]
fn binning_finer_than_one_degree_fails() {
    expect_invalid(HogParams::default().with_binning(1000), "binning");
    expect_invalid(HogParams::default().with_binning(usize::MAX / 2), "binning");
    let signed = HogParams::default().with_angular_range(AngularRange::Signed);
    expect_invalid(signed.clone().with_binning(361), "binning");

    let mut hog = HogDescriptor::new(signed.with_binning(360)).expect("1° bins");
    let data = vec![3u8; 16 * 16];
    hog.process(&ImageU8::packed(16, 16, &data)).expect("process");
    assert_eq!(hog.retrieve_full().expect("retrieve").len(), 4 * 360);
}

#[test]
fn unrecognized_angular_range_fails() {
    let err = AngularRange::try_from(4).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownAngularRange(4)));

    let path = temp_json("range", r#"{ "angularRange": 4 }"#);
    let err = load_params(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
}

#[test]
fn params_load_from_json() {
    let path = temp_json(
        "ok",
        r#"{ "blocksize": 24, "cellsize": 6, "stride": 12, "binning": 18,
             "angularRange": 360, "norm": "l1sqrt", "parallel": false }"#,
    );
    let params = load_params(&path).expect("load");
    fs::remove_file(&path).ok();

    assert_eq!(params.blocksize, 24);
    assert_eq!(params.cells_per_block(), 4);
    assert_eq!(params.stride_cells(), 2);
    assert_eq!(params.angular_range, AngularRange::Signed);
    assert_eq!(params.norm, BlockNorm::L1Sqrt);
    assert!(!params.parallel);
    assert_eq!(params.epsilon, HogParams::default().epsilon);
}

#[test]
fn loaded_params_are_validated() {
    let path = temp_json("invalid", r#"{ "blocksize": 20, "cellsize": 8 }"#);
    let err = load_params(&path).unwrap_err();
    fs::remove_file(&path).ok();
    assert!(matches!(
        err,
        ConfigError::InvalidParameter {
            name: "blocksize",
            ..
        }
    ));
}

#[test]
fn missing_file_reports_read_error() {
    let path = std::env::temp_dir().join("hog-descriptor-does-not-exist.json");
    let err = load_params(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    let wrapped: HogError = err.into();
    assert!(wrapped.to_string().contains("does-not-exist"));
}
