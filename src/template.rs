use std::path::Path;

use thiserror::Error;

use crate::error::FileError;
use crate::file_reader::read_file_as_text;
use crate::script_dir::ScriptDir;

/// Directory under the script dir holding the C++ harness templates.
pub const TEMPLATE_DIR: &str = "templates";

/// The harness flavors the toolkit can generate for a Verilated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessKind {
    /// Free-running clocked main loop until the design hits `$finish`.
    Clocked,
    /// Clocked loop that dumps a VCD trace until a stop condition holds.
    Traced,
    /// Single `eval()` for purely combinational designs.
    Combinational,
}

impl HarnessKind {
    pub fn template_file(self) -> &'static str {
        match self {
            HarnessKind::Clocked => "sim_template.cpp",
            HarnessKind::Traced => "sim_trace_template.cpp",
            HarnessKind::Combinational => "sim_func_template.cpp",
        }
    }
}

/// Tracing inputs, required by [`HarnessKind::Traced`] only.
#[derive(Debug, Clone)]
pub struct TraceParams {
    /// Hierarchy depth passed to `top->trace()`.
    pub depth: u32,
    /// VCD output path opened by the harness.
    pub output: String,
    /// C++ loop condition; the harness runs while it holds.
    pub stop: String,
}

#[derive(Debug, Clone)]
pub struct HarnessParams {
    /// Verilog module name; the Verilated class is `V{module}`.
    pub module: String,
    /// Clock signal toggled each iteration.
    pub clock: String,
    pub trace: Option<TraceParams>,
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unfilled placeholder {placeholder} in {template}")]
    UnfilledPlaceholder { template: String, placeholder: String },
}

/// A loaded harness template with its `$NAME` placeholders still in place.
#[derive(Debug, Clone)]
pub struct HarnessTemplate {
    kind: HarnessKind,
    text: String,
}

impl HarnessTemplate {
    /// Load the template for `kind` from the toolkit's `templates/` directory.
    pub fn load(script_dir: &ScriptDir, kind: HarnessKind) -> Result<Self, FileError> {
        let path = script_dir.join(Path::new(TEMPLATE_DIR).join(kind.template_file()));
        let text = read_file_as_text(&path)?;
        Ok(HarnessTemplate { kind, text })
    }

    pub fn from_text(kind: HarnessKind, text: impl Into<String>) -> Self {
        HarnessTemplate {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> HarnessKind {
        self.kind
    }

    /// Substitute placeholders and return the harness C++ source.
    ///
    /// Errors if any placeholder is left unfilled, e.g. rendering a traced
    /// harness without trace params.
    pub fn render(&self, params: &HarnessParams) -> Result<String, TemplateError> {
        let mut out = self.text.replace("$MODULE", &params.module);
        out = out.replace("$CLOCK", &params.clock);
        if let Some(trace) = &params.trace {
            out = out.replace("$DEPTH", &trace.depth.to_string());
            out = out.replace("$TRACE", &trace.output);
            out = out.replace("$STOP", &trace.stop);
        }
        if let Some(placeholder) = find_unfilled(&out) {
            return Err(TemplateError::UnfilledPlaceholder {
                template: self.kind.template_file().to_string(),
                placeholder,
            });
        }
        Ok(out)
    }
}

// Placeholders are `$` followed by uppercase ASCII; anything else (shell
// variables in comments, literal dollars in user code) is left alone.
fn find_unfilled(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'$' {
            let len = bytes[i + 1..]
                .iter()
                .take_while(|c| c.is_ascii_uppercase())
                .count();
            if len > 0 {
                return Some(text[i..i + 1 + len].to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn clocked_params() -> HarnessParams {
        HarnessParams {
            module: "alu".to_string(),
            clock: "clk".to_string(),
            trace: None,
        }
    }

    const CLOCKED_TEXT: &str = "\
#include \"V$MODULE.h\"

int main() {
  V$MODULE *top = new V$MODULE;
  top->$CLOCK = ~top->$CLOCK;
}
";

    #[test]
    fn test_render_clocked() {
        let template = HarnessTemplate::from_text(HarnessKind::Clocked, CLOCKED_TEXT);
        let rendered = template.render(&clocked_params()).unwrap();

        assert!(rendered.contains("Valu"), "Module placeholder should produce the Verilated class");
        assert!(rendered.contains("top->clk"), "Clock placeholder should produce the signal access");
        assert!(!rendered.contains("$MODULE"));
        assert!(!rendered.contains("$CLOCK"));
    }

    #[test]
    fn test_render_traced() {
        let text = "top->trace(t, $DEPTH);\nt->open(\"$TRACE\");\nwhile ($STOP) { top->$CLOCK = 1; }\n";
        let template = HarnessTemplate::from_text(HarnessKind::Traced, text);
        let params = HarnessParams {
            module: "alu".to_string(),
            clock: "clk".to_string(),
            trace: Some(TraceParams {
                depth: 99,
                output: "waves.vcd".to_string(),
                stop: "context->time() < 1000".to_string(),
            }),
        };

        let rendered = template.render(&params).unwrap();
        assert!(rendered.contains("trace(t, 99)"));
        assert!(rendered.contains("t->open(\"waves.vcd\")"));
        assert!(rendered.contains("while (context->time() < 1000)"));
    }

    #[test]
    fn test_traced_without_params_reports_placeholder() {
        let template =
            HarnessTemplate::from_text(HarnessKind::Traced, "top->trace(t, $DEPTH);\n");
        let err = template.render(&clocked_params()).unwrap_err();

        let TemplateError::UnfilledPlaceholder { template, placeholder } = err;
        assert_eq!(placeholder, "$DEPTH");
        assert_eq!(template, "sim_trace_template.cpp");
    }

    #[test]
    fn test_load_from_script_dir() {
        let tmp = TempDir::new().unwrap();
        let templates = tmp.path().join(TEMPLATE_DIR);
        fs::create_dir(&templates).unwrap();
        fs::write(templates.join("sim_template.cpp"), CLOCKED_TEXT).unwrap();

        let dir = ScriptDir::new(tmp.path()).unwrap();
        let template = HarnessTemplate::load(&dir, HarnessKind::Clocked).unwrap();
        assert_eq!(template.kind(), HarnessKind::Clocked);
        assert!(template.render(&clocked_params()).is_ok());
    }

    #[test]
    fn test_shipped_templates_render() {
        let dir = ScriptDir::new(Path::new(env!("CARGO_MANIFEST_DIR"))).unwrap();

        let clocked = HarnessTemplate::load(&dir, HarnessKind::Clocked).unwrap();
        let rendered = clocked.render(&clocked_params()).unwrap();
        assert!(rendered.contains("#include \"Valu.h\""));
        assert!(rendered.contains("dut->clk = ~dut->clk;"));

        let traced = HarnessTemplate::load(&dir, HarnessKind::Traced).unwrap();
        let params = HarnessParams {
            module: "alu".to_string(),
            clock: "clk".to_string(),
            trace: Some(TraceParams {
                depth: 5,
                output: "alu.vcd".to_string(),
                stop: "context->time() < 200".to_string(),
            }),
        };
        let rendered = traced.render(&params).unwrap();
        assert!(rendered.contains("top->trace(trace, 5);"));
        assert!(rendered.contains("trace->open(\"alu.vcd\");"));

        let combinational = HarnessTemplate::load(&dir, HarnessKind::Combinational).unwrap();
        let rendered = combinational.render(&clocked_params()).unwrap();
        assert!(rendered.contains("Valu *top"));
    }

    #[test]
    fn test_load_missing_template() {
        let tmp = TempDir::new().unwrap();
        let dir = ScriptDir::new(tmp.path()).unwrap();

        let err = HarnessTemplate::load(&dir, HarnessKind::Combinational).unwrap_err();
        assert!(matches!(err, FileError::NotFound { .. }));
        assert!(err.path().ends_with("sim_func_template.cpp"));
    }
}
