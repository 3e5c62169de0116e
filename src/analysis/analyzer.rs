//! File metadata analysis
//!
//! Infers format, quantization and parameter count from published filenames.
//! This is a heuristic over names only; file headers are never read.

use crate::types::model::{ModelCharacteristics, ModelFile};
use once_cell::sync::Lazy;
use regex::Regex;

static QUANTIZATION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"q[0-9]+[a-z]?").expect("quantization pattern is valid"));

static PARAMS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"params_([0-9.]+)([mk]?)\.txt").expect("params pattern is valid")
});

static LEADING_DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]*\.?[0-9]*").expect("decimal pattern is valid"));

/// Derive model characteristics from its file list
///
/// Never fails: unrecognized names simply contribute nothing. When several
/// `params_*.txt` files are present, the last one in the list wins.
pub fn analyze_files(files: &[ModelFile]) -> ModelCharacteristics {
    let mut characteristics = ModelCharacteristics::default();

    for file in files {
        characteristics.total_size_bytes =
            characteristics.total_size_bytes.saturating_add(file.size_bytes);

        let filename = file.filename.to_lowercase();

        if let Some(quant) = QUANTIZATION_PATTERN.find(&filename) {
            characteristics
                .quantizations
                .insert(quant.as_str().to_uppercase());
        }
        if filename.contains("fp16") {
            characteristics.quantizations.insert("FP16".to_string());
        }

        if filename.ends_with(".safetensors") {
            characteristics.formats.insert("safetensors".to_string());
        } else if filename.ends_with(".gguf") {
            characteristics.formats.insert("GGUF".to_string());
        }

        if filename.ends_with(".txt") {
            if let Some(params) = parse_parameter_count(&filename) {
                tracing::trace!(file = %file.filename, params, "Parameter count from filename");
                characteristics.parameter_count = params;
            }
        }
    }

    characteristics
}

/// Parse `params_<number>[m|k].txt` into a parameter count
///
/// No suffix means billions. Any name matching the pattern yields a value:
/// the longest leading decimal of the number is used (`1.2.3` reads as
/// `1.2`), and a number with no digits at all reads as 0, meaning unknown.
fn parse_parameter_count(filename: &str) -> Option<f64> {
    let caps = PARAMS_PATTERN.captures(filename)?;
    let value = caps.get(1).map_or(0.0, |m| leading_decimal(m.as_str()));
    let multiplier = match caps.get(2).map(|m| m.as_str()) {
        Some("m") => 1e6,
        Some("k") => 1e3,
        _ => 1e9,
    };
    Some(value * multiplier)
}

/// Value of the longest `digits[.digits]` prefix of `text`, or 0 without digits
fn leading_decimal(text: &str) -> f64 {
    let end = LEADING_DECIMAL.find(text).map_or(0, |m| m.end());
    text[..end].parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[(&str, u64)]) -> Vec<ModelFile> {
        names
            .iter()
            .map(|(name, size)| ModelFile::new(*name, *size))
            .collect()
    }

    fn set(values: &[&str]) -> std::collections::BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_empty_file_list() {
        let c = analyze_files(&[]);
        assert_eq!(c, ModelCharacteristics::default());
    }

    #[test]
    fn test_gguf_quantization_stops_at_underscore() {
        let c = analyze_files(&files(&[("model-q4_k.gguf", 1000)]));
        assert_eq!(c.quantizations, set(&["Q4"]));
        assert_eq!(c.formats, set(&["GGUF"]));
        assert_eq!(c.total_size_bytes, 1000);
    }

    #[test]
    fn test_safetensors_without_quantization() {
        let c = analyze_files(&files(&[("model.safetensors", 1000)]));
        assert_eq!(c.formats, set(&["safetensors"]));
        assert!(c.quantizations.is_empty());
        assert_eq!(c.parameter_count, 0.0);
    }

    #[test]
    fn test_trailing_letter_is_captured() {
        let c = analyze_files(&files(&[("llama-Q5K.gguf", 1)]));
        assert_eq!(c.quantizations, set(&["Q5K"]));
    }

    #[test]
    fn test_fp16_and_quant_both_fire() {
        let c = analyze_files(&files(&[("model-q8-fp16.safetensors", 1)]));
        assert_eq!(c.quantizations, set(&["Q8", "FP16"]));
    }

    #[test]
    fn test_case_folded_extensions() {
        let c = analyze_files(&files(&[("MODEL.GGUF", 1), ("Weights.SafeTensors", 1)]));
        assert_eq!(c.formats, set(&["GGUF", "safetensors"]));
    }

    #[test]
    fn test_unrelated_files_contribute_size_only() {
        let c = analyze_files(&files(&[
            ("README.md", 10),
            ("config.json", 20),
            ("pytorch_model.bin", 30),
        ]));
        assert_eq!(c.total_size_bytes, 60);
        assert!(c.formats.is_empty());
        assert!(c.quantizations.is_empty());
    }

    #[test]
    fn test_parameter_suffixes() {
        let c = analyze_files(&files(&[("params_6.txt", 1)]));
        assert_eq!(c.parameter_count, 6e9);

        let c = analyze_files(&files(&[("params_125M.txt", 1)]));
        assert_eq!(c.parameter_count, 125e6);

        let c = analyze_files(&files(&[("params_3k.txt", 1)]));
        assert_eq!(c.parameter_count, 3e3);

        let c = analyze_files(&files(&[("params_1.5.txt", 1)]));
        assert_eq!(c.parameter_count, 1.5e9);
    }

    #[test]
    fn test_last_parameter_file_wins() {
        let c = analyze_files(&files(&[("params_7.txt", 1), ("params_2.txt", 1)]));
        assert_eq!(c.parameter_count, 2e9);

        let c = analyze_files(&files(&[("params_2.txt", 1), ("params_7.txt", 1)]));
        assert_eq!(c.parameter_count, 7e9);
    }

    #[test]
    fn test_malformed_parameter_count_uses_leading_decimal() {
        let c = analyze_files(&files(&[("params_7.txt", 1), ("params_1.2.3.txt", 1)]));
        assert_eq!(c.parameter_count, 1.2e9);

        let c = analyze_files(&files(&[("params_3.5.0m.txt", 1)]));
        assert_eq!(c.parameter_count, 3.5e6);

        let c = analyze_files(&files(&[("params_7..txt", 1)]));
        assert_eq!(c.parameter_count, 7e9);
    }

    #[test]
    fn test_parameter_count_without_digits_resets_to_unknown() {
        let c = analyze_files(&files(&[("params_7.txt", 1), ("params_..txt", 1)]));
        assert_eq!(c.parameter_count, 0.0);
        assert!(!c.has_parameter_count());

        // Not a parameter file at all, so nothing is recorded
        let c = analyze_files(&files(&[("params_7b.txt", 1)]));
        assert_eq!(c.parameter_count, 0.0);
    }

    #[test]
    fn test_leading_decimal() {
        assert_eq!(leading_decimal("12"), 12.0);
        assert_eq!(leading_decimal("1.2.3"), 1.2);
        assert_eq!(leading_decimal(".5"), 0.5);
        assert_eq!(leading_decimal("7."), 7.0);
        assert_eq!(leading_decimal("."), 0.0);
        assert_eq!(leading_decimal(".."), 0.0);
    }

    #[test]
    fn test_result_independent_of_order() {
        let forward = files(&[
            ("a-q4_0.gguf", 5),
            ("b-q8_0.gguf", 7),
            ("c.safetensors", 11),
        ]);
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(analyze_files(&forward), analyze_files(&reversed));
    }
}
