/*!
 * Tests for application configuration
 */

#![allow(non_snake_case)]

use anyhow::Result;
use autosub::app_config::{ComputeType, Config, Device};
use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.transcription.command, "whisperx");
    assert_eq!(config.transcription.model, "medium");
    assert_eq!(config.transcription.device, Device::Cpu);
    assert!(config.transcription.compute_type.is_none());
    assert_eq!(config.extraction.command, "ffmpeg");
    assert_eq!(config.extraction.sample_rate, 16000);
    assert_eq!(config.extraction.channels, 1);
    assert_eq!(config.watch.poll_interval_secs, 2);
    assert!(config.watch.extensions.iter().any(|e| e == "mkv"));
}

/// Test that the default configuration validates
#[test]
fn test_default_config_shouldValidate() {
    assert!(Config::default().validate().is_ok());
}

/// Test the compute type fallback on cpu
#[test]
fn test_effective_compute_type_withCpuDevice_shouldDefaultToFloat32() {
    let config = Config::default();
    assert_eq!(
        config.transcription.effective_compute_type(),
        ComputeType::Float32
    );
}

/// Test the compute type fallback on cuda
#[test]
fn test_effective_compute_type_withCudaDevice_shouldDefaultToFloat16() {
    let mut config = Config::default();
    config.transcription.device = Device::Cuda;
    assert_eq!(
        config.transcription.effective_compute_type(),
        ComputeType::Float16
    );
}

/// Test that an explicit compute type wins over the device fallback
#[test]
fn test_effective_compute_type_withExplicitOverride_shouldUseOverride() {
    let mut config = Config::default();
    config.transcription.compute_type = Some(ComputeType::Int8);
    assert_eq!(
        config.transcription.effective_compute_type(),
        ComputeType::Int8
    );
}

/// Test JSON round-trip of the configuration
#[test]
fn test_config_serialization_shouldRoundTrip() -> Result<()> {
    let config = Config::default();
    let json = serde_json::to_string_pretty(&config)?;
    let parsed: Config = serde_json::from_str(&json)?;

    assert_eq!(parsed.transcription.model, config.transcription.model);
    assert_eq!(parsed.transcription.device, config.transcription.device);
    assert_eq!(parsed.watch.extensions, config.watch.extensions);
    Ok(())
}

/// Test that a sparse config file fills in defaults
#[test]
fn test_config_deserialization_withPartialJson_shouldApplyDefaults() -> Result<()> {
    let json = r#"{"transcription": {"model": "large", "device": "cuda"}}"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.transcription.model, "large");
    assert_eq!(config.transcription.device, Device::Cuda);
    assert_eq!(config.transcription.command, "whisperx");
    assert_eq!(config.extraction.sample_rate, 16000);
    Ok(())
}

/// Test validation of an empty model name
#[test]
fn test_validate_withEmptyModel_shouldFail() {
    let mut config = Config::default();
    config.transcription.model = "  ".to_string();
    assert!(config.validate().is_err());
}

/// Test validation of a zero poll interval
#[test]
fn test_validate_withZeroPollInterval_shouldFail() {
    let mut config = Config::default();
    config.watch.poll_interval_secs = 0;
    assert!(config.validate().is_err());
}

/// Test validation of an empty extension list
#[test]
fn test_validate_withNoExtensions_shouldFail() {
    let mut config = Config::default();
    config.watch.extensions.clear();
    assert!(config.validate().is_err());
}

/// Test loading a config written to disk
#[test]
fn test_config_load_withFileOnDisk_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let json = serde_json::to_string_pretty(&Config::default())?;
    let path = common::create_test_file(temp_dir.path(), "conf.json", &json)?;

    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    assert!(config.validate().is_ok());
    Ok(())
}
