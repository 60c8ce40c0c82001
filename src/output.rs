use serde::Serialize;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Human }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, Self::Human)
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    ok: bool,
    command: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

/// Print `{"ok": true, "command": ..., "data": ...}`
pub fn emit_success<T: Serialize>(output_mode: OutputMode, command: &str, data: T) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope = Envelope { ok: true, command, data: Some(data), error: None };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}

/// Print `{"ok": false, "command": ..., "error": ...}`
pub fn emit_error(output_mode: OutputMode, command: &str, message: &str) -> anyhow::Result<()> {
    if output_mode.is_human() {
        return Ok(());
    }
    let envelope: Envelope<'_, ()> = Envelope { ok: false, command, data: None, error: Some(message) };
    println!("{}", serde_json::to_string_pretty(&envelope)?);
    Ok(())
}
