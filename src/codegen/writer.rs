//! Assignment statements and the per-solver output file.
use crate::error::Result;
use log::info;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One generated line: `poly.c[2] = a*( b + c );`
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub field: String,
    pub index: usize,
    pub expression: String,
}

impl Assignment {
    pub fn new(target: &str, field: &str, index: usize, expression: String) -> Self {
        Self {
            target: target.to_string(),
            field: field.to_string(),
            index,
            expression,
        }
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}[{}] = {};",
            self.target, self.field, self.index, self.expression
        )
    }
}

fn create_with_parents(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}

/// Writes one assignment per line to `path`, creating parent directories.
pub fn write_assignments(path: &Path, assignments: &[Assignment]) -> Result<()> {
    let mut out = create_with_parents(path)?;
    for a in assignments {
        writeln!(out, "{}", a)?;
    }
    out.flush()?;
    Ok(())
}

/// All assignments generated for one solver, plus a comment header naming it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub solver: String,
    pub assignments: Vec<Assignment>,
}

impl GeneratedFile {
    pub fn new(solver: &str, assignments: Vec<Assignment>) -> Self {
        Self {
            solver: solver.to_string(),
            assignments,
        }
    }

    pub fn header(&self) -> String {
        format!(
            "// {} coefficients: {} assignments. Generated by solver_coeffs, do not edit.",
            self.solver,
            self.assignments.len()
        )
    }

    pub fn render(&self) -> String {
        let mut text = self.header();
        text.push('\n');
        for a in &self.assignments {
            text.push_str(&a.to_string());
            text.push('\n');
        }
        text
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut out = create_with_parents(path)?;
        out.write_all(self.render().as_bytes())?;
        out.flush()?;
        info!(
            "wrote {} assignments for {} to {}",
            self.assignments.len(),
            self.solver,
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_assignment_display() {
        let a = Assignment::new("poly", "c", 2, "a*( b + c )".to_string());
        assert_eq!(a.to_string(), "poly.c[2] = a*( b + c );");
    }

    #[test]
    fn test_write_assignments_creates_parents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out/coeffs.txt");
        let lines = vec![
            Assignment::new("A", "data", 0, "x".to_string()),
            Assignment::new("A", "data", 1, "0".to_string()),
        ];
        write_assignments(&path, &lines).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "A.data[0] = x;\nA.data[1] = 0;\n");
    }

    #[test]
    fn test_generated_file_render() {
        let file = GeneratedFile::new(
            "p3p_grunert",
            vec![Assignment::new("poly", "c", 0, "K1".to_string())],
        );
        let text = file.render();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("// p3p_grunert coefficients"));
        assert_eq!(lines.next(), Some("poly.c[0] = K1;"));
        assert_eq!(lines.next(), None);

        let dir = tempdir().unwrap();
        let path = dir.path().join("grunert.txt");
        file.write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }
}
