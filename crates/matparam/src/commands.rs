//! The work behind each [Command].

use std::io::{self, Write};
use std::path::Path;

use material::{
    AssetFileError, ComputeColorParameter, ParameterAsset, ParameterError, ParameterKind,
};

use thiserror::Error;

use crate::args::Command;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    AssetFile(#[from] AssetFileError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Run `command`, writing anything meant for the user to `out`.
pub fn run<W: Write>(command: Command, out: &mut W) -> Result<(), CommandError> {
    match command {
        Command::Defaults { kind } => defaults(kind.as_deref(), out),
        Command::Show { file } => show(&file, out),
        Command::Set {
            file,
            name,
            kind,
            value,
        } => set(&file, name, &kind, value.as_deref(), out),
        Command::Remove { file, name } => remove(&file, &name, out),
        Command::Convert { input, output } => convert(&input, &output, out),
    }
}

fn defaults<W: Write>(kind: Option<&str>, out: &mut W) -> Result<(), CommandError> {
    let kinds = match kind {
        Some(kind) => vec![ParameterKind::from_name(kind)?],
        None => ParameterKind::ALL.to_vec(),
    };

    let defaults: Vec<_> = kinds
        .into_iter()
        .map(ComputeColorParameter::default_for)
        .collect();

    serde_json::to_writer_pretty(&mut *out, &defaults)?;
    writeln!(out)?;
    Ok(())
}

fn show<W: Write>(file: &Path, out: &mut W) -> Result<(), CommandError> {
    let asset = ParameterAsset::load(file)?;

    if asset.parameters.is_empty() {
        writeln!(out, "No parameters in {}", file.display())?;
        return Ok(());
    }

    let name_width = asset
        .parameters
        .names()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    for (name, param) in &asset.parameters {
        writeln!(
            out,
            "{name:<name_width$}  {:<8}  {param}",
            param.kind().short_name()
        )?;
    }
    Ok(())
}

fn set<W: Write>(
    file: &Path,
    name: String,
    kind: &str,
    value: Option<&str>,
    out: &mut W,
) -> Result<(), CommandError> {
    let kind = ParameterKind::from_name(kind)?;
    let param = match value {
        Some(text) => ComputeColorParameter::parse(kind, text)?,
        None => ComputeColorParameter::default_for(kind),
    };

    let mut asset = ParameterAsset::load_or_create(file, ParameterAsset::default)?;
    let shown = param.to_string();
    let replaced = asset.parameters.insert(name.clone(), param);
    asset.save(file)?;

    match replaced {
        Some(old) => writeln!(out, "{name}: {old} -> {shown}")?,
        None => writeln!(out, "{name}: {shown}")?,
    }
    Ok(())
}

fn remove<W: Write>(file: &Path, name: &str, out: &mut W) -> Result<(), CommandError> {
    let mut asset = ParameterAsset::load(file)?;

    if asset.parameters.remove(name).is_none() {
        return Err(ParameterError::Missing(name.to_string()).into());
    }
    asset.save(file)?;

    writeln!(out, "Removed {name}")?;
    Ok(())
}

fn convert<W: Write>(input: &Path, output: &Path, out: &mut W) -> Result<(), CommandError> {
    let asset = ParameterAsset::load(input)?;
    asset.save(output)?;

    writeln!(
        out,
        "Wrote {} parameters to {}",
        asset.parameters.len(),
        output.display()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use material::compute_colors::{Float3, TextureAddressMode};

    use super::*;

    /// A scratch directory that's removed when dropped.
    struct ScratchDir(PathBuf);

    impl ScratchDir {
        fn new(test_name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "matparam-{test_name}-{}",
                std::process::id()
            ));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Self(dir)
        }

        fn path(&self, file_name: &str) -> PathBuf {
            self.0.join(file_name)
        }
    }

    impl Drop for ScratchDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn run_to_string(command: Command) -> Result<String, CommandError> {
        let mut out = Vec::new();
        run(command, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn set_command(file: &Path, name: &str, kind: &str, value: Option<&str>) -> Command {
        Command::Set {
            file: file.to_path_buf(),
            name: name.to_string(),
            kind: kind.to_string(),
            value: value.map(str::to_string),
        }
    }

    #[test]
    fn defaults_prints_every_kind() {
        let output = run_to_string(Command::Defaults { kind: None }).unwrap();
        let defaults: Vec<ComputeColorParameter> = serde_json::from_str(&output).unwrap();

        let kinds: Vec<_> = defaults.iter().map(ComputeColorParameter::kind).collect();
        assert_eq!(kinds, ParameterKind::ALL.to_vec());
    }

    #[test]
    fn defaults_for_one_kind() {
        let output = run_to_string(Command::Defaults {
            kind: Some("ComputeColorParameterSampler".to_string()),
        })
        .unwrap();
        assert!(output.contains("\"filtering\": \"Linear\""));

        let result = run_to_string(Command::Defaults {
            kind: Some("matrix".to_string()),
        });
        assert!(matches!(
            result,
            Err(CommandError::Parameter(ParameterError::UnknownTag(_)))
        ));
    }

    #[test]
    fn set_creates_and_updates_the_file() {
        let dir = ScratchDir::new("set");
        let file = dir.path("lit.json");

        run_to_string(set_command(&file, "Tint", "float3", Some("1, 0.5, 0"))).unwrap();
        run_to_string(set_command(&file, "Sampler", "sampler", Some("Point, Clamp"))).unwrap();
        let output = run_to_string(set_command(&file, "Tint", "float3", None)).unwrap();
        assert_eq!(output, "Tint: 1, 0.5, 0 -> 0, 0, 0\n");

        let asset = ParameterAsset::load(&file).unwrap();
        assert_eq!(asset.parameters.value::<Float3>("Tint"), Ok(&Float3::ZERO));
        let sampler = asset.parameters.get("Sampler").and_then(|p| p.as_sampler()).unwrap();
        assert_eq!(sampler.address_mode_u, TextureAddressMode::Clamp);
    }

    #[test]
    fn set_rejects_bad_values_without_touching_the_file() {
        let dir = ScratchDir::new("set-bad");
        let file = dir.path("lit.json");

        let result = run_to_string(set_command(&file, "Count", "int", Some("many")));
        assert!(matches!(
            result,
            Err(CommandError::Parameter(ParameterError::Parse { .. }))
        ));
        assert!(!file.exists());

        run_to_string(set_command(&file, "Strength", "float", Some("1"))).unwrap();
        let result = run_to_string(set_command(&file, "Strength", "float", Some("NaN")));
        assert!(matches!(
            result,
            Err(CommandError::Parameter(ParameterError::Parse { .. }))
        ));
        let asset = ParameterAsset::load(&file).unwrap();
        assert_eq!(asset.parameters.value::<f32>("Strength"), Ok(&1.0));
    }

    #[test]
    fn show_lists_parameters_by_name() {
        let dir = ScratchDir::new("show");
        let file = dir.path("lit.matp");

        run_to_string(set_command(&file, "Roughness", "float", Some("0.5"))).unwrap();
        run_to_string(set_command(&file, "Albedo", "texture", Some("textures/brick"))).unwrap();

        let output = run_to_string(Command::Show { file }).unwrap();
        assert_eq!(
            output,
            "Albedo     texture   textures/brick\nRoughness  float     0.5\n"
        );
    }

    #[test]
    fn show_aligns_non_ascii_names() {
        let dir = ScratchDir::new("show-utf8");
        let file = dir.path("lit.json");

        run_to_string(set_command(&file, "Größe", "int", Some("3"))).unwrap();
        run_to_string(set_command(&file, "Alpha", "bool", Some("false"))).unwrap();

        let output = run_to_string(Command::Show { file }).unwrap();
        assert_eq!(output, "Alpha  bool      false\nGröße  int       3\n");
    }

    #[test]
    fn remove_then_convert() {
        let dir = ScratchDir::new("convert");
        let json = dir.path("lit.json");
        let binary = dir.path("lit.matp");

        run_to_string(set_command(&json, "A", "bool", Some("true"))).unwrap();
        run_to_string(set_command(&json, "B", "int", Some("-2"))).unwrap();
        run_to_string(Command::Remove {
            file: json.clone(),
            name: "A".to_string(),
        })
        .unwrap();

        let result = run_to_string(Command::Remove {
            file: json.clone(),
            name: "A".to_string(),
        });
        assert!(matches!(
            result,
            Err(CommandError::Parameter(ParameterError::Missing(_)))
        ));

        run_to_string(Command::Convert {
            input: json.clone(),
            output: binary.clone(),
        })
        .unwrap();
        assert_eq!(
            ParameterAsset::load(&binary).unwrap(),
            ParameterAsset::load(&json).unwrap()
        );
    }
}
