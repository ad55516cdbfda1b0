
use std::io::Write;

use support_single::{run_drench, spawn_ingest_server, ForwardAll, RejectAll};

fn corpus_file() -> Result<tempfile::NamedTempFile, String> {
    let mut file =
        tempfile::NamedTempFile::new().map_err(|err| format!("tempfile failed: {}", err))?;
    file.write_all(b"{\"event\":\"a\"}\n{\"event\":\"bb\"}\n{\"event\":\"ccc\"}\n")
        .map_err(|err| format!("write corpus failed: {}", err))?;
    Ok(file)
}

fn corpus_path(file: &tempfile::NamedTempFile) -> Result<String, String> {
    file.path()
        .to_str()
        .map(ToOwned::to_owned)
        .ok_or_else(|| "corpus path was not UTF-8".to_owned())
}

#[test]
fn e2e_direct_reports_all_items() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "direct",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "25",
        "--seed",
        "1",
    ])?;

    if !output.status.success() {
        return Err(format!(
            "expected success, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("direct results:") || !stdout.contains("\"items\":25") {
        return Err(format!("missing result line in output: {}", stdout));
    }
    if state.records_ingested() != 25 {
        return Err(format!(
            "expected 25 ingested records, got {}",
            state.records_ingested()
        ));
    }
    Ok(())
}

#[test]
fn e2e_chunked_delivers_every_record() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "chunked",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "40",
        "--chunk-size-bytes",
        "64",
    ])?;

    if !output.status.success() {
        return Err(format!(
            "expected success, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("chunked results:") || !stdout.contains("\"items\":40") {
        return Err(format!("missing result line in output: {}", stdout));
    }
    if state.records_ingested() != 40 {
        return Err(format!(
            "expected 40 ingested records, got {}",
            state.records_ingested()
        ));
    }
    Ok(())
}

#[test]
fn e2e_pool_delivers_every_record() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "pool",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "50",
        "--parallelism",
        "4",
    ])?;

    if !output.status.success() {
        return Err(format!(
            "expected success, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("pool results:") || !stdout.contains("\"items\":50") {
        return Err(format!("missing result line in output: {}", stdout));
    }
    if state.records_ingested() != 50 {
        return Err(format!(
            "expected 50 ingested records, got {}",
            state.records_ingested()
        ));
    }
    Ok(())
}

#[test]
fn e2e_buffered_delivers_every_record() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "buffered",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "30",
        "--buffer-capacity-bytes",
        "64",
    ])?;

    if !output.status.success() {
        return Err(format!(
            "expected success, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.contains("buffered results:") || !stdout.contains("\"items\":30") {
        return Err(format!("missing result line in output: {}", stdout));
    }
    if state.records_ingested() != 30 {
        return Err(format!(
            "expected 30 ingested records, got {}",
            state.records_ingested()
        ));
    }
    Ok(())
}

#[test]
fn e2e_strategies_run_sequentially() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "direct",
        "chunked",
        "pool",
        "buffered",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "10",
        "--parallelism",
        "2",
        "--chunk-size-bytes",
        "64",
        "--buffer-capacity-bytes",
        "64",
    ])?;

    if !output.status.success() {
        return Err(format!(
            "expected success, stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        ));
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in [
        "direct results:",
        "chunked results:",
        "pool results:",
        "buffered results:",
        "Done. Results:",
    ] {
        if !stdout.contains(line) {
            return Err(format!("missing '{}' in output: {}", line, stdout));
        }
    }
    if state.records_ingested() != 40 {
        return Err(format!(
            "expected 40 ingested records across strategies, got {}",
            state.records_ingested()
        ));
    }
    Ok(())
}

#[test]
fn e2e_short_circuiting_processor_fails_the_run() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(RejectAll)])?;
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "direct",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        &url,
        "--item-count",
        "5",
    ])?;

    if output.status.success() {
        return Err("expected non-zero exit against a rejecting service".to_owned());
    }
    if state.records_ingested() != 0 {
        return Err("short-circuited requests must not be ingested".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_missing_corpus_file_fails_fast() -> Result<(), String> {
    let (url, state, _server) = spawn_ingest_server(vec![Box::new(ForwardAll)])?;

    let output = run_drench([
        "--impl",
        "direct",
        "--data-file",
        "/nonexistent/drench-corpus.jsonl",
        "--url",
        &url,
    ])?;

    if output.status.success() {
        return Err("expected non-zero exit for a missing corpus file".to_owned());
    }
    if state.records_ingested() != 0 {
        return Err("nothing must be ingested when the corpus is missing".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_unreachable_target_fails_fast() -> Result<(), String> {
    let file = corpus_file()?;

    let output = run_drench([
        "--impl",
        "direct",
        "--data-file",
        &corpus_path(&file)?,
        "--url",
        "http://127.0.0.1:1",
        "--wait-timeout",
        "200ms",
    ])?;

    if output.status.success() {
        return Err("expected non-zero exit for an unreachable target".to_owned());
    }
    Ok(())
}

#[test]
fn e2e_missing_impl_is_a_usage_error() -> Result<(), String> {
    let output = run_drench(["--data-file", "data.jsonl"])?;
    if output.status.success() {
        return Err("expected usage error without --impl".to_owned());
    }
    Ok(())
}
