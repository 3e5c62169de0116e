//! End-to-end checks from registry JSON to verdicts

use modelfit::storage::huggingface::parse_model_records;
use modelfit::types::hardware::WILDCARD;
use modelfit::{
    analyze_files, assess, estimate_memory, evaluate, find_profile, Gate, HardwareProfile,
    ModelFile, Session,
};

const GIB: u64 = 1024 * 1024 * 1024;

fn reference_profile() -> HardwareProfile {
    HardwareProfile::new("Reference", 16.0, 4.0, 1, &[WILDCARD], &[WILDCARD])
}

#[test]
fn total_size_is_exact_sum() {
    let files = vec![
        ModelFile::new("a.gguf", 3),
        ModelFile::new("b.gguf", 5),
        ModelFile::new("README.md", 7),
    ];
    assert_eq!(analyze_files(&files).total_size_bytes, 15);
    assert_eq!(analyze_files(&[]).total_size_bytes, 0);
}

#[test]
fn duplicate_tags_collapse() {
    let files = vec![
        ModelFile::new("part-1-q4_k.gguf", 1),
        ModelFile::new("part-2-q4_k.gguf", 1),
    ];
    let c = analyze_files(&files);
    assert_eq!(c.quantizations.len(), 1);
    assert_eq!(c.formats.len(), 1);
}

#[test]
fn fp16_model_from_reference_example_fits() {
    let c = analyze_files(&[ModelFile::new("model-fp16.gguf", 2 * GIB)]);
    assert_eq!(estimate_memory(&c), 3.0 * GIB as f64);

    let report = assess(&c, &reference_profile());
    assert!(report.is_compatible());
    assert!(evaluate(&c, &reference_profile()));
}

#[test]
fn missing_format_fails_every_profile() {
    let c = analyze_files(&[ModelFile::new("pytorch_model.bin", 1)]);
    for profile in modelfit::profiles() {
        assert!(!evaluate(&c, profile), "{} accepted an unknown format", profile.name);
        assert_eq!(assess(&c, profile).failed_gate, Some(Gate::Format));
    }
}

#[test]
fn laptop_rejects_unquantized_safetensors() {
    let c = analyze_files(&[ModelFile::new("model.safetensors", GIB)]);
    let laptop = find_profile("MacBook Pro (16-inch, Intel, 16GB RAM)").unwrap();
    assert_eq!(assess(&c, laptop).failed_gate, Some(Gate::Quantization));
}

#[test]
fn parameter_file_drives_estimate() {
    let c = analyze_files(&[
        ModelFile::new("model-q4_0.gguf", GIB),
        ModelFile::new("params_70.txt", 16),
    ]);
    // 70B params at 0.5 bytes -> 35e9 bytes of weights -> 52.5e9 required
    assert_eq!(estimate_memory(&c), 52.5e9);

    let a100 = find_profile("Single Server with NVIDIA A100 (40GB)").unwrap();
    assert!(evaluate(&c, a100));
    let g4dn = find_profile("AWS EC2 g4dn.xlarge").unwrap();
    assert_eq!(assess(&c, g4dn).failed_gate, Some(Gate::Memory));
}

#[test]
fn registry_json_to_filtered_session() {
    let json = r#"[
        {
            "id": "TheBloke/Mistral-7B-GGUF",
            "downloads": 5000,
            "siblings": [
                {"rfilename": "mistral-7b.Q4_K_M.gguf", "lfs": {"sha256": "aa", "size": 4368439584}},
                {"rfilename": "README.md", "size": 2048}
            ]
        },
        {
            "id": "mistralai/Mistral-7B-v0.1",
            "downloads": 90000,
            "siblings": [
                {"rfilename": "model-00001-of-00002.safetensors", "size": 9942981696},
                {"rfilename": "model-00002-of-00002.safetensors", "size": 4540516344}
            ]
        }
    ]"#;

    let mut session = Session::new();
    session
        .select_profile("MacBook Pro (13-inch, M1, 8GB RAM)")
        .unwrap();
    // Filenames only ever yield "Q4", never "Q4_K"
    session.add_supported_quantization("Q4");
    session.load_models(parse_model_records(json).unwrap());
    session.set_filter_compatible(true);

    let visible = session.visible_models();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].0.info.id, "TheBloke/Mistral-7B-GGUF");

    session.set_filter_compatible(false);
    let all = session.visible_models();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].1.failed_gate, Some(Gate::Quantization));
}

#[test]
fn evaluation_has_no_hidden_state() {
    let c = analyze_files(&[ModelFile::new("big-q8_0.gguf", 40 * GIB)]);
    let profile = reference_profile();
    let first = evaluate(&c, &profile);
    for _ in 0..3 {
        assert_eq!(evaluate(&c, &profile), first);
    }
}
