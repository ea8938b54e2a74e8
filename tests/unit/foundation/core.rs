use super::*;

#[test]
fn defaults_match_documented_values() {
    let p = ParallaxParams::default();
    assert_eq!(p.parallax_perc, 0.5);
    assert_eq!(p.layers_count, 10);
    assert_eq!(p.zero_parallax_layer_num, 5);
}

#[test]
fn non_positive_band_counts_clamp_to_one() {
    let p = ParallaxParams::new(1.0, 0, -3).unwrap();
    assert_eq!(p.layers_count, 1);
    assert_eq!(p.zero_parallax_layer_num, 1);
}

#[test]
fn non_finite_parallax_is_rejected() {
    assert!(ParallaxParams::new(f64::NAN, 10, 5).is_err());
    assert!(ParallaxParams::new(f64::INFINITY, 10, 5).is_err());
}

#[test]
fn max_shift_is_percentage_of_width() {
    let p = ParallaxParams::new(50.0, 10, 5).unwrap();
    assert_eq!(p.max_shift(10), 5.0);
    assert_eq!(ParallaxParams::default().max_shift(1000), 5.0);
}

#[test]
fn output_mode_selects_runs() {
    assert!(OutputMode::Both.runs_split() && OutputMode::Both.runs_combined());
    assert!(OutputMode::Split.runs_split() && !OutputMode::Split.runs_combined());
    assert!(!OutputMode::Pair.runs_split() && OutputMode::Pair.runs_combined());
}

#[test]
fn output_mode_serde_is_lowercase() {
    let m: OutputMode = serde_json::from_str("\"pair\"").unwrap();
    assert_eq!(m, OutputMode::Pair);
    assert_eq!(serde_json::to_string(&OutputMode::Split).unwrap(), "\"split\"");
}

#[test]
fn view_file_stems() {
    assert_eq!(ViewKind::Left.file_stem(), "left");
    assert_eq!(ViewKind::Right.file_stem(), "right");
    assert_eq!(ViewKind::Pair.file_stem(), "pair");
}

#[test]
fn output_mode_cli_names_match_config_names() {
    use clap::ValueEnum;
    for mode in [OutputMode::Both, OutputMode::Pair, OutputMode::Split] {
        let name = mode.to_possible_value().unwrap().get_name().to_owned();
        assert_eq!(OutputMode::from_str(&name, false).unwrap(), mode);
        let json = serde_json::to_string(&mode).unwrap();
        assert_eq!(json, format!("\"{name}\""));
    }
}
