use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde_json::{Map, Value};

/// Where a command writes its JSON artifact: stdout by default, a file
/// when `--output` is given.
#[derive(Debug)]
pub enum Output {
    Stdout(io::StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Serializes `value` as pretty JSON to `path`, or to stdout when no
    /// path is given.
    pub fn save_json<T>(value: &T, path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match path {
            Some(path) => Self::create(path)?,
            None => Self::Stdout(io::stdout().lock()),
        };
        let target = output.display_path();

        serde_json::to_writer_pretty(&mut output, value)
            .with_context(|| format!("Failed to write JSON to {target}"))?;
        writeln!(&mut output).with_context(|| format!("Failed to finish JSON in {target}"))?;
        output
            .flush()
            .with_context(|| format!("Failed to flush output to {target}"))?;
        Ok(())
    }

    fn create(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Self::Stdout(_) => "stdout".to_string(),
            Self::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(writer) => writer.write(buf),
            Self::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(writer) => writer.flush(),
            Self::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Reads the data source's export: an ordered JSON array of key-value
/// observation records.
pub fn read_observations_file<P>(path: P) -> anyhow::Result<Vec<Map<String, Value>>>
where
    P: AsRef<Path>,
{
    read_json_file("observations", path)
}
