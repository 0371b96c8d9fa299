// CLI command implementations
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::sync::mpsc;

use anyhow::{anyhow, Context};
use chrono::Utc;
use glob::glob;
use icystream::{IcyConfig, IcyStreamFilter, MetadataEntry};

use crate::cli::config::StreamArgs;
use crate::cli::output::{MetadataEvent, OutputFormatter};

const READ_CHUNK_SIZE: usize = 8192;

/// Totals for one processed stream
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StreamSummary {
    pub audio_bytes: u64,
    pub entries: usize,
    pub titles: usize,
}

impl StreamSummary {
    fn record(&mut self, entry: &MetadataEntry) {
        self.entries += 1;
        if entry.is_stream_title() {
            self.titles += 1;
        }
    }
}

/// Print metadata entries from captured streams
pub fn command_dump(
    files: &[String],
    stream: &StreamArgs,
    formatter: &OutputFormatter,
) -> anyhow::Result<()> {
    let config = stream.to_icy_config()?;
    let paths = expand_patterns(files)?;
    if paths.is_empty() {
        return Err(anyhow!("No files matched"));
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let mut failures = 0;

    for path in &paths {
        match dump_file(Path::new(path), &config, formatter, &mut writer) {
            Ok(summary) => formatter.print_info(&format!(
                "{}: {} audio bytes, {} metadata entries ({} titles)",
                path, summary.audio_bytes, summary.entries, summary.titles
            )),
            Err(e) => {
                failures += 1;
                formatter.print_error(&format!("{}: {:#}", path, e));
            }
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} files failed", failures, paths.len()));
    }
    Ok(())
}

/// Write the audio payload of a captured stream to `output`
pub fn command_strip(
    file: &Path,
    output: &Path,
    stream: &StreamArgs,
    formatter: &OutputFormatter,
) -> anyhow::Result<()> {
    let config = stream.to_icy_config()?;
    let summary = strip_file(file, output, &config)?;
    formatter.print_success(&format!(
        "Wrote {} audio bytes to {} ({} metadata entries removed)",
        summary.audio_bytes,
        output.display(),
        summary.entries
    ));
    Ok(())
}

/// Expand glob patterns; plain paths are kept as given
fn expand_patterns(files: &[String]) -> anyhow::Result<Vec<String>> {
    let mut paths = Vec::new();
    for file in files {
        if !file.contains(&['*', '?', '['][..]) {
            paths.push(file.clone());
            continue;
        }

        for entry in glob(file).with_context(|| format!("Invalid glob pattern: {}", file))? {
            let path = entry?;
            if path.is_file() {
                paths.push(path.to_string_lossy().into_owned());
            }
        }
    }
    Ok(paths)
}

fn open_filter(
    path: &Path,
    config: &IcyConfig,
) -> anyhow::Result<(IcyStreamFilter<BufReader<File>>, mpsc::Receiver<MetadataEntry>)> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let (tx, rx) = mpsc::channel();

    let filter = IcyStreamFilter::from_config(BufReader::new(file), config)?.with_listener(
        move |key: &str, value: &str| {
            // the receiver outlives every read
            let _ = tx.send(MetadataEntry::new(key, value));
        },
    );

    Ok((filter, rx))
}

/// Run one captured stream through the filter, writing an event per entry
fn dump_file(
    path: &Path,
    config: &IcyConfig,
    formatter: &OutputFormatter,
    writer: &mut impl Write,
) -> anyhow::Result<StreamSummary> {
    let (mut filter, rx) = open_filter(path, config)?;
    let name = path.to_string_lossy();
    let mut buffer = vec![0u8; READ_CHUNK_SIZE];
    let mut summary = StreamSummary::default();

    loop {
        let read = filter
            .read(&mut buffer)
            .with_context(|| format!("Failed to read {}", name))?;
        summary.audio_bytes += read as u64;

        for entry in rx.try_iter() {
            let event = MetadataEvent {
                file: &name,
                offset: summary.audio_bytes,
                received_at: Utc::now().to_rfc3339(),
                key: &entry.key,
                value: &entry.value,
            };
            formatter.output_event(&event, writer)?;
            summary.record(&entry);
        }

        if read == 0 {
            break;
        }
    }

    Ok(summary)
}

fn strip_file(path: &Path, output: &Path, config: &IcyConfig) -> anyhow::Result<StreamSummary> {
    let (mut filter, rx) = open_filter(path, config)?;
    let out = File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = BufWriter::new(out);

    let audio_bytes = io::copy(&mut filter, &mut writer)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    writer.flush()?;

    let mut summary = StreamSummary {
        audio_bytes,
        ..StreamSummary::default()
    };
    for entry in rx.try_iter() {
        summary.record(&entry);
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config::OutputFormat;

    /// Four periods of 8 audio bytes, two of them followed by real metadata
    fn capture() -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(b"AAAAAAAA");
        data.push(3);
        let mut text = b"StreamTitle='First';StreamUrl='u';".to_vec();
        text.resize(48, 0);
        data.extend(text);
        data.extend_from_slice(b"BBBBBBBB");
        data.push(0);
        data.extend_from_slice(b"CCCCCCCC");
        data.push(1);
        let mut text = b"StreamTitle='2';".to_vec();
        text.resize(16, 0);
        data.extend(text);
        data.extend_from_slice(b"DDDD");
        data
    }

    fn capture_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&capture()).unwrap();
        file
    }

    #[test]
    fn test_dump_file_reports_offsets() {
        let file = capture_file();
        let formatter = OutputFormatter::new(OutputFormat::Json, true);
        let mut out = Vec::new();

        let summary = dump_file(file.path(), &IcyConfig::new(8), &formatter, &mut out).unwrap();
        assert_eq!(
            summary,
            StreamSummary {
                audio_bytes: 28,
                entries: 3,
                titles: 2,
            }
        );

        let events: Vec<serde_json::Value> = out
            .split(|&b| b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).unwrap())
            .collect();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["key"], "StreamTitle");
        assert_eq!(events[0]["value"], "First");
        assert_eq!(events[0]["offset"], 8);
        assert_eq!(events[1]["key"], "StreamUrl");
        assert_eq!(events[2]["value"], "2");
        assert_eq!(events[2]["offset"], 24);
    }

    #[test]
    fn test_strip_file_removes_metadata() {
        let file = capture_file();
        let output = tempfile::NamedTempFile::new().unwrap();

        let summary = strip_file(file.path(), output.path(), &IcyConfig::new(8)).unwrap();
        assert_eq!(summary.entries, 3);
        assert_eq!(summary.titles, 2);
        assert_eq!(
            std::fs::read(output.path()).unwrap(),
            b"AAAAAAAABBBBBBBBCCCCCCCCDDDD"
        );
    }

    #[test]
    fn test_expand_patterns() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.icy", "b.icy", "c.txt"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        let pattern = format!("{}/*.icy", dir.path().display());
        let mut paths = expand_patterns(&[pattern, "plain.bin".to_string()]).unwrap();
        paths.sort();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("a.icy"));
        assert!(paths[1].ends_with("b.icy"));
        assert_eq!(paths[2], "plain.bin");
    }

    #[test]
    fn test_missing_file() {
        let formatter = OutputFormatter::new(OutputFormat::Pretty, true);
        let mut out = Vec::new();
        let result = dump_file(
            Path::new("/nonexistent/capture.bin"),
            &IcyConfig::new(8),
            &formatter,
            &mut out,
        );
        assert!(result.is_err());
    }
}
