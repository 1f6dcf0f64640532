use std::io::Read;

use common::{Frame, Point, PointColor, Rgb};
use log::{debug, trace, warn};

use crate::{
    codec::{self, FormatCode, Header, Record, HEADER_SIZE},
    error::{DecodeError, FormatError},
    palette::Palette,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Reading,
    /// The last frame announced by the header totals was handed out
    Delivered,
    EndOfStream,
    Failed,
}

/// Pull based reader of ILDA frames.
///
/// Palette frames are applied to the decoder's own palette as they go by and
/// are never returned. Any error is final: the decoder does not try to find
/// the next header after a bad one.
///
/// ```no_run
/// # fn main() -> Result<(), rusty_ilda::error::DecodeError> {
/// let file = std::fs::File::open("show.ild").unwrap();
/// let mut decoder = rusty_ilda::Decoder::new(std::io::BufReader::new(file));
/// while let Some(frame) = decoder.next_frame()? {
///     println!("{} has {} points", frame.name, frame.points.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct Decoder<R> {
    reader: R,
    palette: Palette,
    state: State,
    error: Option<DecodeError>,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_palette(reader, Palette::default())
    }

    /// Start with `palette` instead of the default table
    pub fn with_palette(reader: R, palette: Palette) -> Self {
        Self {
            reader,
            palette,
            state: State::Reading,
            error: None,
        }
    }

    /// Whether another call to [`Decoder::next_frame`] can produce a frame
    pub fn has_next(&self) -> bool {
        self.state == State::Reading
    }

    /// The first error that stopped this decoder, if any
    pub fn err(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// The palette indexed colors are currently resolved against
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read the next frame.
    ///
    /// `Ok(None)` means the stream ended normally, either on the empty header
    /// or after the last frame of the declared total. One call may consume
    /// several palette frames before it reaches a frame with points.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        match self.state {
            State::Reading => {}
            State::Delivered | State::EndOfStream => return Ok(None),
            State::Failed => {
                return Err(self.error.clone().unwrap_or(DecodeError::ShortRead));
            }
        }

        match self.read_frame() {
            Ok(Some(frame)) => {
                if frame.is_last() {
                    debug!("Frame {} closes a {} frame sequence", frame.number, frame.total);
                    self.state = State::Delivered;
                }
                Ok(Some(frame))
            }
            Ok(None) => {
                trace!("Reached the end of stream header");
                self.state = State::EndOfStream;
                Ok(None)
            }
            Err(err) => {
                warn!("Stopped decoding: {}", err);
                self.state = State::Failed;
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Decode every remaining frame
    pub fn all_frames(&mut self) -> Result<Vec<Frame>, DecodeError> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, DecodeError> {
        loop {
            let header = self.read_header()?;
            debug!("Read header: {}", header);

            if header.is_end_of_stream() {
                return Ok(None);
            }

            let records = self.read_records(&header)?;

            if header.format.is_palette() {
                let entries = records
                    .iter()
                    .filter_map(|record| match record {
                        Record::PaletteEntry(rgb) => Some(*rgb),
                        _ => None,
                    })
                    .collect::<Vec<Rgb>>();
                debug!(
                    "Replacing the palette with \"{}\" ({} entries)",
                    header.name(),
                    entries.len()
                );
                self.palette.replace(entries);
                continue;
            }

            return self.build_frame(&header, &records).map(Some);
        }
    }

    fn read_header(&mut self) -> Result<Header, DecodeError> {
        let mut bytes = [0u8; HEADER_SIZE];
        self.reader.read_exact(&mut bytes)?;
        Ok(codec::decode_header(&bytes)?)
    }

    /// Every declared record is read, whatever their status bytes say, so the
    /// next header stays aligned.
    fn read_records(&mut self, header: &Header) -> Result<Vec<Record>, DecodeError> {
        let mut body = vec![0u8; header.body_size()];
        self.reader.read_exact(&mut body)?;

        body.chunks_exact(header.format.record_size())
            .map(|bytes| codec::decode_record(header.format, bytes).map_err(DecodeError::from))
            .collect()
    }

    fn build_frame(&self, header: &Header, records: &[Record]) -> Result<Frame, DecodeError> {
        let mut points = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            points.push(resolve(record, &self.palette)?);

            let last_point = record.status().map_or(false, |status| status.last_point);
            if last_point && i + 1 < records.len() {
                warn!(
                    "Frame {} marks record {} of {} as its last point, ignoring the rest",
                    header.frame_number,
                    i,
                    records.len()
                );
                break;
            }
        }

        Ok(Frame {
            name: header.name(),
            company: header.company(),
            number: header.frame_number,
            total: header.total_frames,
            projector: header.projector,
            points,
        })
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Frame, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.has_next() {
            return None;
        }
        self.next_frame().transpose()
    }
}

/// Turn a point record into a point, looking indexed colors up in `palette`.
///
/// Blanked points resolve to [`PointColor::Invisible`] without touching the
/// palette, so their color index is never checked.
pub fn resolve(record: &Record, palette: &Palette) -> Result<Point, FormatError> {
    let lookup = |index: u8| {
        palette
            .get(index)
            .map(PointColor::Rgb)
            .ok_or(FormatError::ColorIndexOutOfRange {
                index,
                len: palette.len(),
            })
    };

    let point = match *record {
        Record::IndexedColor3D {
            x,
            y,
            z,
            status,
            color_index,
        } => Point {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            color: if status.blanking {
                PointColor::Invisible
            } else {
                lookup(color_index)?
            },
        },
        Record::IndexedColor2D {
            x,
            y,
            status,
            color_index,
        } => Point {
            x: x.into(),
            y: y.into(),
            z: 0,
            color: if status.blanking {
                PointColor::Invisible
            } else {
                lookup(color_index)?
            },
        },
        Record::TrueColor3D {
            x,
            y,
            z,
            status,
            color,
        } => Point {
            x: x.into(),
            y: y.into(),
            z: z.into(),
            color: if status.blanking {
                PointColor::Invisible
            } else {
                PointColor::Rgb(color)
            },
        },
        Record::TrueColor2D {
            x,
            y,
            status,
            color,
        } => Point {
            x: x.into(),
            y: y.into(),
            z: 0,
            color: if status.blanking {
                PointColor::Invisible
            } else {
                PointColor::Rgb(color)
            },
        },
        // A palette entry has no position
        Record::PaletteEntry(_) => {
            return Err(FormatError::UnsupportedFormat(FormatCode::Palette as u8))
        }
    };

    Ok(point)
}
