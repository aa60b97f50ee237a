use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use npatch_mesh::{Triangle, TriangleMesh, Vector3};
use std::io::{BufRead, BufReader, Read, Seek, Write};
use std::path::Path;

pub mod npt;

/// Size of the free-form header at the start of a binary file.
const BINARY_HEADER_LEN: usize = 80;

/// Normal, three vertices and the attribute byte count.
const BINARY_TRIANGLE_LEN: u64 = 50;

/// ASCII files never contain control bytes this low, binary ones almost always do somewhere in
/// the header or in the float data.
const MAX_BINARY_MARKER: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StlFormat {
    Ascii,
    Binary,
}

/// Guesses the encoding of an STL file from its contents.
pub fn detect_format(data: &[u8]) -> StlFormat {
    if data.iter().any(|&b| b <= MAX_BINARY_MARKER) {
        StlFormat::Binary
    } else {
        StlFormat::Ascii
    }
}

fn read_vector<T: Read>(f: &mut T) -> std::io::Result<Vector3> {
    Ok(Vector3 {
        x: f.read_f32::<LittleEndian>()?,
        y: f.read_f32::<LittleEndian>()?,
        z: f.read_f32::<LittleEndian>()?,
    })
}

fn read_binary<M: TriangleMesh, T: Read + Seek>(f: &mut T) -> std::io::Result<M> {
    let len = f.seek(std::io::SeekFrom::End(0))?;

    // An 80 byte header with no defined structure, skipped, then the triangle count.
    f.seek(std::io::SeekFrom::Start(BINARY_HEADER_LEN as u64))?;
    let n_triangles = f.read_u32::<LittleEndian>()? as usize;

    let needed = (BINARY_HEADER_LEN + 4) as u64 + n_triangles as u64 * BINARY_TRIANGLE_LEN;
    if len < needed {
        return Err(invalid_data(format!(
            "header promises {} triangles but the file holds {} bytes",
            n_triangles, len
        )));
    }

    let mut data = Vec::<Triangle>::with_capacity(n_triangles);
    for _ in 0..n_triangles {
        // The stored normal is skipped, it is recomputed from the winding.
        let _normal = read_vector(f)?;
        data.push(Triangle {
            p0: read_vector(f)?,
            p1: read_vector(f)?,
            p2: read_vector(f)?,
        });
        let _attribute_byte_count = f.read_u16::<LittleEndian>()?;
    }
    log::debug!("read {} triangles from binary stl", n_triangles);
    Ok(M::from_triangles(data))
}

pub(crate) fn invalid_data(msg: String) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, msg)
}

fn read_ascii<M: TriangleMesh, T: BufRead>(f: T) -> std::io::Result<M> {
    // Only the `vertex x y z` records matter, every three of them make a facet. The
    // `facet normal`, `outer loop` and `end*` keywords carry nothing we use.
    let mut points = Vec::new();
    for (line_no, line) in f.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("vertex") {
            continue;
        }
        let mut coords = [0f32; 3];
        for c in &mut coords {
            *c = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(|| invalid_data(format!("bad vertex on line {}", line_no + 1)))?;
        }
        points.push(Vector3::new(coords[0], coords[1], coords[2]));
    }

    if points.len() % 3 != 0 {
        return Err(invalid_data(format!(
            "{} vertices do not make whole facets",
            points.len()
        )));
    }
    let data: Vec<Triangle> = points
        .chunks_exact(3)
        .map(|p| Triangle::new(p[0], p[1], p[2]))
        .collect();
    log::debug!("read {} triangles from ascii stl", data.len());
    Ok(M::from_triangles(data))
}

pub fn read_stl<M: TriangleMesh, P: AsRef<Path>>(p: P) -> std::io::Result<M> {
    let data = std::fs::read(p)?;
    parse_stl(&data)
}

pub fn parse_stl<M: TriangleMesh>(data: &[u8]) -> std::io::Result<M> {
    match detect_format(data) {
        StlFormat::Binary => {
            let mut c = std::io::Cursor::new(data);
            read_binary(&mut c)
        }
        StlFormat::Ascii => read_ascii(BufReader::new(data)),
    }
}

pub trait StlReader: Read {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M>;
}

impl<T: Read + Seek> StlReader for T {
    fn read_stl<M: TriangleMesh>(&mut self) -> std::io::Result<M> {
        let mut data = Vec::new();
        self.read_to_end(&mut data)?;
        parse_stl(&data)
    }
}

fn write_vector<W: Write>(w: &mut W, v: Vector3) -> std::io::Result<()> {
    w.write_f32::<LittleEndian>(v.x)?;
    w.write_f32::<LittleEndian>(v.y)?;
    w.write_f32::<LittleEndian>(v.z)
}

/// Writes `mesh` as a binary STL.
pub fn write_stl<M: TriangleMesh, W: Write>(w: &mut W, mesh: &M) -> std::io::Result<()> {
    let mut header = [0u8; BINARY_HEADER_LEN];
    let tag = b"npatch";
    header[..tag.len()].copy_from_slice(tag);
    w.write_all(&header)?;

    w.write_u32::<LittleEndian>(mesh.triangle_count() as u32)?;
    for t in mesh.triangles() {
        write_vector(w, t.normal())?;
        write_vector(w, t.p0)?;
        write_vector(w, t.p1)?;
        write_vector(w, t.p2)?;
        w.write_u16::<LittleEndian>(0)?;
    }
    Ok(())
}

pub fn save_stl<M: TriangleMesh, P: AsRef<Path>>(p: P, mesh: &M) -> std::io::Result<()> {
    let mut f = std::io::BufWriter::new(std::fs::File::create(p)?);
    write_stl(&mut f, mesh)?;
    f.flush()
}
