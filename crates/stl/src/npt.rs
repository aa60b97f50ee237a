//! Readers and writers for `.npt` patch files.
//!
//! An NPT file lists, for every face, its three vertices followed by the patch
//! coefficients (3 for quadratic patches, 7 for cubic ones).

use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use npatch_mesh::{to_f32, PatchedMesh, Point, Triangle, TriangleMesh};

use crate::{detect_format, invalid_data, StlFormat};

/// Bytes in one stored point.
const POINT_LEN: u64 = 12;

/// One face as stored in an NPT file.
#[derive(Debug, Clone, PartialEq)]
pub struct NptFace {
    pub vertices: [Point; 3],
    pub coefficients: Vec<Point>,
}

impl NptFace {
    pub fn triangle(&self) -> Triangle {
        let [p0, p1, p2] = self.vertices.map(to_f32);
        Triangle::new(p0, p1, p2)
    }
}

/// The conventional output path for `input`: `<stem>_lib.npt` next to it.
pub fn npt_output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}_lib.npt", stem))
}

/// Formats `v` the way C's `% e` does: a sign column, six decimals and an
/// exponent of at least two digits.
fn sci(v: f64) -> String {
    if !v.is_finite() {
        return if v.is_sign_negative() {
            format!("{}", v)
        } else {
            format!(" {}", v)
        };
    }
    let s = format!("{:.6e}", v);
    let (mantissa, exp) = s.split_once('e').unwrap_or((&s, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let sign = if mantissa.starts_with('-') { "" } else { " " };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    format!("{}{}e{}{:02}", sign, mantissa, exp_sign, exp.abs())
}

fn write_ascii_row<W: Write>(w: &mut W, label: &str, p: Point) -> std::io::Result<()> {
    writeln!(w, "      {}  {}  {}  {}", label, sci(p.x), sci(p.y), sci(p.z))
}

/// Writes the human readable form. `name` is recorded in the header.
pub fn write_npt_ascii<W: Write>(w: &mut W, name: &str, mesh: &PatchedMesh) -> std::io::Result<()> {
    let patches = mesh.patches();
    writeln!(w, " {} ", patches.len())?;
    writeln!(w, "  file name : {} \n", name)?;

    for (id, patch) in patches.iter().enumerate() {
        writeln!(w, "  facet ID  {:>10} ", id)?;
        for v in patch.vertices() {
            write_ascii_row(w, "vertex", v)?;
        }
        for (k, c) in patch.coefficients().into_iter().enumerate() {
            write_ascii_row(w, &format!("coef{} ", k + 1), c)?;
        }
    }
    writeln!(w, "end Face Informaion")
}

fn write_point<W: Write>(w: &mut W, p: Point) -> std::io::Result<()> {
    w.write_f32::<LittleEndian>(p.x as f32)?;
    w.write_f32::<LittleEndian>(p.y as f32)?;
    w.write_f32::<LittleEndian>(p.z as f32)
}

/// Writes the compact form: a little endian `i32` face count, then for every
/// face its vertices and coefficients as `f32` triples.
pub fn write_npt_binary<W: Write>(w: &mut W, mesh: &PatchedMesh) -> std::io::Result<()> {
    let patches = mesh.patches();
    let count = i32::try_from(patches.len()).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} faces do not fit an npt header", patches.len()),
        )
    })?;
    w.write_i32::<LittleEndian>(count)?;
    for patch in patches {
        for v in patch.vertices() {
            write_point(w, v)?;
        }
        for c in patch.coefficients() {
            write_point(w, c)?;
        }
    }
    Ok(())
}

/// Writes `mesh` to `path` in either form.
pub fn save_npt<P: AsRef<Path>>(path: P, mesh: &PatchedMesh, binary: bool) -> std::io::Result<()> {
    let path = path.as_ref();
    let mut f = std::io::BufWriter::new(std::fs::File::create(path)?);
    if binary {
        write_npt_binary(&mut f, mesh)?;
    } else {
        write_npt_ascii(&mut f, &path.to_string_lossy(), mesh)?;
    }
    f.flush()?;
    log::info!(
        "wrote {} {:?} patches to {}",
        mesh.patches().len(),
        mesh.degree(),
        path.display()
    );
    Ok(())
}

fn is_coefficient_count(n: usize) -> bool {
    n == 3 || n == 7
}

fn parse_point<'a, I: Iterator<Item = &'a str>>(
    tokens: &mut I,
    line_no: usize,
) -> std::io::Result<Point> {
    let mut coords = [0f64; 3];
    for c in &mut coords {
        *c = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| invalid_data(format!("bad point on line {}", line_no + 1)))?;
    }
    Ok(Point::new(coords[0], coords[1], coords[2]))
}

/// Reads the human readable form written by [`write_npt_ascii`].
pub fn read_npt_ascii<R: BufRead>(r: R) -> std::io::Result<Vec<NptFace>> {
    let mut count = None;
    let mut faces: Vec<(Vec<Point>, Vec<Point>)> = Vec::new();

    for (line_no, line) in r.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            continue;
        };
        if count.is_none() {
            count = Some(first.parse::<usize>().map_err(|_| {
                invalid_data(format!("expected a face count on line {}", line_no + 1))
            })?);
            continue;
        }

        match first {
            "file" => continue,
            "facet" => faces.push((Vec::with_capacity(3), Vec::with_capacity(7))),
            "end" => break,
            label => {
                let Some((vertices, coefficients)) = faces.last_mut() else {
                    return Err(invalid_data(format!(
                        "point before the first facet on line {}",
                        line_no + 1
                    )));
                };
                let point = parse_point(&mut tokens, line_no)?;
                if label == "vertex" {
                    vertices.push(point);
                } else if label.starts_with("coef") {
                    coefficients.push(point);
                } else {
                    return Err(invalid_data(format!(
                        "unknown record {:?} on line {}",
                        label,
                        line_no + 1
                    )));
                }
            }
        }
    }

    let count = count.ok_or_else(|| invalid_data("empty npt file".to_string()))?;
    if count != faces.len() {
        return Err(invalid_data(format!(
            "header promises {} faces, found {}",
            count,
            faces.len()
        )));
    }
    let faces = faces
        .into_iter()
        .enumerate()
        .map(|(id, (vertices, coefficients))| {
            let vertices = <[Point; 3]>::try_from(vertices).map_err(|v| {
                invalid_data(format!("facet {} has {} vertices", id, v.len()))
            })?;
            if !is_coefficient_count(coefficients.len()) {
                return Err(invalid_data(format!(
                    "facet {} has {} coefficients",
                    id,
                    coefficients.len()
                )));
            }
            Ok(NptFace {
                vertices,
                coefficients,
            })
        })
        .collect::<std::io::Result<Vec<_>>>()?;
    log::debug!("read {} faces from ascii npt", faces.len());
    Ok(faces)
}

fn read_point<R: Read>(r: &mut R) -> std::io::Result<Point> {
    Ok(Point::new(
        r.read_f32::<LittleEndian>()?.into(),
        r.read_f32::<LittleEndian>()?.into(),
        r.read_f32::<LittleEndian>()?.into(),
    ))
}

/// Reads the compact form written by [`write_npt_binary`].
///
/// The file does not record the degree, so the number of coefficients per
/// face is recovered from the file length.
pub fn read_npt_binary<R: Read + Seek>(r: &mut R) -> std::io::Result<Vec<NptFace>> {
    let len = r.seek(SeekFrom::End(0))?;
    r.seek(SeekFrom::Start(0))?;
    let count = r.read_i32::<LittleEndian>()?;
    let count = usize::try_from(count)
        .map_err(|_| invalid_data(format!("negative face count {}", count)))?;

    let body = len - 4;
    if count == 0 {
        return Ok(Vec::new());
    }
    let face_len = body / count as u64;
    let points = face_len / POINT_LEN;
    let coefficient_count = points.saturating_sub(3) as usize;
    if face_len * count as u64 != body
        || face_len % POINT_LEN != 0
        || !is_coefficient_count(coefficient_count)
    {
        return Err(invalid_data(format!(
            "{} bytes do not hold {} faces",
            body, count
        )));
    }

    let mut faces = Vec::with_capacity(count);
    for _ in 0..count {
        let vertices = [read_point(r)?, read_point(r)?, read_point(r)?];
        let coefficients = (0..coefficient_count)
            .map(|_| read_point(r))
            .collect::<std::io::Result<Vec<_>>>()?;
        faces.push(NptFace {
            vertices,
            coefficients,
        });
    }
    log::debug!("read {} faces from binary npt", faces.len());
    Ok(faces)
}

/// Reads either form of NPT, keeping only the face triangles.
pub fn parse_npt<M: TriangleMesh>(data: &[u8]) -> std::io::Result<M> {
    let faces = match detect_format(data) {
        StlFormat::Binary => read_npt_binary(&mut std::io::Cursor::new(data))?,
        StlFormat::Ascii => read_npt_ascii(BufReader::new(data))?,
    };
    Ok(M::from_triangles(
        faces.iter().map(NptFace::triangle).collect(),
    ))
}

pub fn read_npt<M: TriangleMesh, P: AsRef<Path>>(p: P) -> std::io::Result<M> {
    let data = std::fs::read(p)?;
    parse_npt(&data)
}
