use anyhow::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader, Chain, Cursor, Read};
use std::path::Path;

type ChainReader = Chain<Cursor<Vec<u8>>, File>;

const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Log file reader that transparently handles archived logs
/// Detects gzip (1F 8B 08) and zstd (28 B5 2F FD) compression using magic bytes
pub enum DecompressionReader {
    Gzip(BufReader<MultiGzDecoder<ChainReader>>),
    Zstd(BufReader<zstd::Decoder<'static, BufReader<ChainReader>>>),
    Plain(BufReader<ChainReader>),
}

// zstd::Decoder doesn't implement Debug
impl std::fmt::Debug for DecompressionReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecompressionReader::Gzip(_) => write!(f, "DecompressionReader::Gzip"),
            DecompressionReader::Zstd(_) => write!(f, "DecompressionReader::Zstd"),
            DecompressionReader::Plain(_) => write!(f, "DecompressionReader::Plain"),
        }
    }
}

impl DecompressionReader {
    /// Open `path`, sniffing the first bytes to pick a decoder
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;

        let mut head = [0u8; 4];
        let n = read_head(&mut file, &mut head)?;

        // Put the sniffed bytes back in front of the rest of the file
        let chained = Cursor::new(head[..n].to_vec()).chain(file);

        let reader = if n >= 3 && head[..3] == GZIP_MAGIC {
            DecompressionReader::Gzip(BufReader::new(MultiGzDecoder::new(chained)))
        } else if n >= 4 && head == ZSTD_MAGIC {
            DecompressionReader::Zstd(BufReader::new(zstd::Decoder::new(chained)?))
        } else {
            DecompressionReader::Plain(BufReader::new(chained))
        };
        Ok(reader)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DecompressionReader::Gzip(_) => "gzip",
            DecompressionReader::Zstd(_) => "zstd",
            DecompressionReader::Plain(_) => "plain",
        }
    }
}

/// Fill `buf` as far as the file allows; short files yield fewer bytes
fn read_head(file: &mut File, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

impl Read for DecompressionReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match self {
            DecompressionReader::Gzip(reader) => reader.read(buf),
            DecompressionReader::Zstd(reader) => reader.read(buf),
            DecompressionReader::Plain(reader) => reader.read(buf),
        }
    }
}

impl BufRead for DecompressionReader {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        match self {
            DecompressionReader::Gzip(reader) => reader.fill_buf(),
            DecompressionReader::Zstd(reader) => reader.fill_buf(),
            DecompressionReader::Plain(reader) => reader.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            DecompressionReader::Gzip(reader) => reader.consume(amt),
            DecompressionReader::Zstd(reader) => reader.consume(amt),
            DecompressionReader::Plain(reader) => reader.consume(amt),
        }
    }
}
