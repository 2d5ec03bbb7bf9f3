use crate::core::io::traits::StructureFile;
use crate::core::models::atom::Atom;
use crate::core::models::structure::Structure;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Header declares {expected} atoms but {found} were read")]
    AtomCount { expected: usize, found: usize },
}

/// The comment (second) line of an XYZ file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XyzMetadata {
    pub comment: String,
}

pub struct XyzFile;

impl StructureFile for XyzFile {
    type Metadata = XyzMetadata;
    type Error = XyzError;

    fn read_from(
        reader: &mut impl BufRead,
        name: &str,
    ) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut lines = reader.lines().enumerate();

        let expected = match lines.next() {
            Some((_, line)) => {
                let line = line?;
                line.trim().parse::<usize>().map_err(|_| XyzError::Parse {
                    line: 1,
                    message: format!("invalid atom count '{}'", line.trim()),
                })?
            }
            None => {
                return Err(XyzError::Parse {
                    line: 1,
                    message: "file is empty".to_string(),
                });
            }
        };

        let comment = match lines.next() {
            Some((_, line)) => line?.trim().to_string(),
            None => String::new(),
        };

        let mut atoms = Vec::with_capacity(expected);
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if atoms.len() == expected {
                break;
            }
            atoms.push(parse_atom_line(&line, idx + 1)?);
        }

        if atoms.len() != expected {
            return Err(XyzError::AtomCount {
                expected,
                found: atoms.len(),
            });
        }

        Ok((Structure::new(name, atoms, 0, 1), XyzMetadata { comment }))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.n_atoms())?;
        writeln!(writer, "{}", metadata.comment)?;
        for atom in &structure.atoms {
            writeln!(
                writer,
                "{:<3}{:>14.6}{:>14.6}{:>14.6}",
                atom.label, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, XyzError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(XyzError::Parse {
            line: line_num,
            message: format!("expected 'label x y z', found '{}'", line.trim()),
        });
    }

    let mut coords = [0.0; 3];
    for (k, field) in fields[1..4].iter().enumerate() {
        coords[k] = field.parse::<f64>().map_err(|_| XyzError::Parse {
            line: line_num,
            message: format!("invalid coordinate '{}'", field),
        })?;
    }

    Ok(Atom::new(
        fields[0],
        Point3::new(coords[0], coords[1], coords[2]),
    ))
}
