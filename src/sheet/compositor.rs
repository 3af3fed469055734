//! Sheet compositing and upload.
//!
//! `SheetCompositor::render` tiles every registered card's face image into
//! its grid cell, one sheet per simple page and a front/back sheet pair per
//! double-faced page. `upload_sheets` encodes the sheets as PNG and hands
//! them to the uploader in order, giving up on the first failure.

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, info, warn};

use super::geometry::{page_rows, sheet_pixels};
use crate::core::clock::Clock;
use crate::core::config::CardSize;
use crate::core::error::Result;
use crate::core::naming::file_stem;
use crate::core::ids::{IdSpace, SlotId};
use crate::core::throttle::Throttle;
use crate::services::{CardCatalog, SheetUploader};
use crate::session::ConversionSession;

/// Which side of a double-faced pair a sheet shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetSide {
    Front,
    Back,
}

/// One rendered grid image.
#[derive(Clone, Debug)]
pub struct Sheet {
    pub page: u32,
    pub side: SheetSide,
    pub rows: u32,
    pub image: RgbaImage,
}

impl Sheet {
    fn blank(page: u32, side: SheetSide, rows: u32, size: &CardSize) -> Self {
        let (width, height) = sheet_pixels(size.width, size.height, rows);
        Self {
            page,
            side,
            rows,
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])),
        }
    }

    /// Encode the sheet as PNG.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image.write_to(&mut buf, ImageFormat::Png)?;
        Ok(buf.into_inner())
    }
}

/// Sheets for both id spaces.
///
/// `double_faced` alternates front and back: `[front 0, back 0, front 1, ...]`.
#[derive(Clone, Debug, Default)]
pub struct RenderedSheets {
    pub simple: Vec<Sheet>,
    pub double_faced: Vec<Sheet>,
}

/// Public URLs of uploaded sheets, in the same order as `RenderedSheets`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SheetUrls {
    pub simple: Vec<String>,
    pub double_faced: Vec<String>,
}

impl SheetUrls {
    /// `(front, back)` URL pairs of the double-faced pages.
    pub fn double_faced_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.double_faced
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

/// Renders sheets from a session's registries.
///
/// Every image fetch waits on one shared throttle, so a double-faced card
/// (two fetches) costs two intervals.
pub struct SheetCompositor<'a, C> {
    catalog: &'a mut C,
    clock: &'a dyn Clock,
    throttle: Throttle,
    card_size: CardSize,
}

impl<'a, C: CardCatalog> SheetCompositor<'a, C> {
    pub fn new(catalog: &'a mut C, clock: &'a dyn Clock, card_size: CardSize, throttle: Throttle) -> Self {
        Self {
            catalog,
            clock,
            throttle,
            card_size,
        }
    }

    /// Render all sheets for the cards registered in `session`.
    pub fn render(&mut self, session: &ConversionSession) -> Result<RenderedSheets> {
        info!(size = %self.card_size.tag, "creating base images");
        let mut simple: Vec<Sheet> = page_rows(IdSpace::Simple, session.simple().len())
            .into_iter()
            .enumerate()
            .map(|(page, rows)| Sheet::blank(page as u32, SheetSide::Front, rows, &self.card_size))
            .collect();

        let mut double_faced: Vec<Sheet> = page_rows(IdSpace::DoubleFaced, session.double_faced().len())
            .into_iter()
            .enumerate()
            .flat_map(|(page, rows)| {
                [
                    Sheet::blank(page as u32, SheetSide::Front, rows, &self.card_size),
                    Sheet::blank(page as u32, SheetSide::Back, rows, &self.card_size),
                ]
            })
            .collect();

        for (slot, card) in session.simple().iter() {
            debug!(card = %card.name, id = %slot, "handling card");
            let uri = card.front_image_uri(&self.card_size.tag)?;
            let face = self.fetch_face(uri)?;
            self.paste(&mut simple[slot.page() as usize].image, &face, slot);
        }

        for (slot, card) in session.double_faced().iter() {
            debug!(card = %card.name, id = %slot, "handling double-faced card");
            let (front_uri, back_uri) = card.sheet_faces(&self.card_size.tag)?;
            let front = self.fetch_face(front_uri)?;
            let back = self.fetch_face(back_uri)?;
            let page = slot.page() as usize;
            self.paste(&mut double_faced[page * 2].image, &front, slot);
            self.paste(&mut double_faced[page * 2 + 1].image, &back, slot);
        }

        Ok(RenderedSheets {
            simple,
            double_faced,
        })
    }

    fn fetch_face(&mut self, uri: &str) -> Result<RgbaImage> {
        self.throttle.wait(self.clock);
        let bytes = self.catalog.get_card_image(uri)?;
        let face = image::load_from_memory(&bytes)?.to_rgba8();
        if face.dimensions() == (self.card_size.width, self.card_size.height) {
            return Ok(face);
        }
        Ok(imageops::resize(
            &face,
            self.card_size.width,
            self.card_size.height,
            FilterType::Triangle,
        ))
    }

    fn paste(&self, sheet: &mut RgbaImage, face: &RgbaImage, slot: SlotId) {
        let (col, row) = slot.cell();
        let x = i64::from(col * self.card_size.width);
        let y = i64::from(row * self.card_size.height);
        imageops::replace(sheet, face, x, y);
    }
}

/// Naming for uploaded sheet files.
#[derive(Clone, Debug)]
pub struct SheetNames {
    pub prefix: String,
    pub stem: String,
}

impl SheetNames {
    /// `stem` is usually a deck name; it is made safe as a file name.
    pub fn new(prefix: impl Into<String>, stem: &str) -> Self {
        Self {
            prefix: prefix.into(),
            stem: file_stem(stem),
        }
    }

    #[must_use]
    pub fn file_name(&self, space: IdSpace, index: usize) -> String {
        format!("{}_{}_{}_{}.png", self.prefix, self.stem, space.label(), index)
    }
}

/// Upload every sheet, simple batch first.
///
/// Returns `Ok(None)` as soon as the uploader fails; the double-faced batch is
/// never attempted after a simple-batch failure. Encoding errors propagate.
pub fn upload_sheets<U: SheetUploader>(
    sheets: &RenderedSheets,
    uploader: &mut U,
    names: &SheetNames,
) -> Result<Option<SheetUrls>> {
    info!(
        simple = sheets.simple.len(),
        double_faced = sheets.double_faced.len(),
        "saving images"
    );
    let Some(simple) = upload_batch(&sheets.simple, IdSpace::Simple, uploader, names)? else {
        return Ok(None);
    };
    let Some(double_faced) = upload_batch(&sheets.double_faced, IdSpace::DoubleFaced, uploader, names)? else {
        return Ok(None);
    };
    Ok(Some(SheetUrls {
        simple,
        double_faced,
    }))
}

fn upload_batch<U: SheetUploader>(
    sheets: &[Sheet],
    space: IdSpace,
    uploader: &mut U,
    names: &SheetNames,
) -> Result<Option<Vec<String>>> {
    let mut urls = Vec::with_capacity(sheets.len());
    for (i, sheet) in sheets.iter().enumerate() {
        let file_name = names.file_name(space, i);
        let bytes = sheet.encode_png()?;
        match uploader.upload(&bytes, &file_name) {
            Some(url) => urls.push(url),
            None => {
                warn!(file = %file_name, space = space.label(), "sheet upload failed, aborting batch");
                return Ok(None);
            }
        }
    }
    Ok(Some(urls))
}

/// Render and upload in one step.
///
/// `Ok(None)` means an upload failed and nothing should be built from this run.
pub fn composite<C: CardCatalog, U: SheetUploader>(
    compositor: &mut SheetCompositor<'_, C>,
    session: &ConversionSession,
    uploader: &mut U,
    names: &SheetNames,
) -> Result<Option<SheetUrls>> {
    let sheets = compositor.render(session)?;
    upload_sheets(&sheets, uploader, names)
}
