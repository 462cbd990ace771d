//! A4 portrait PDF documents holding a captured bitmap.
//!
//! Page 1 carries the centred title and the image 25 mm from the top. While
//! image height remains beyond what earlier pages showed, another page is
//! added with the image re-placed so the next slice is visible.

use super::raster::Bitmap;
use crate::error::ExportError;

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f64 = 297.0;
/// Left margin of the image.
pub const MARGIN_MM: f64 = 10.0;
/// Printed image width.
pub const IMAGE_WIDTH_MM: f64 = 190.0;
/// Distance from the top of page 1 to the image.
pub const FIRST_PAGE_OFFSET_MM: f64 = 25.0;
/// Baseline of the title on page 1.
const TITLE_BASELINE_MM: f64 = 15.0;
const TITLE_SIZE_PT: f64 = 16.0;

const POINTS_PER_MM: f64 = 72.0 / 25.4;

/// Helvetica advance widths for printable ASCII, in thousandths of an em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 222, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    222, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

/// Printed height of a `width` by `height` pixel image at 190 mm wide.
#[must_use]
pub fn image_height_mm(width: u32, height: u32) -> f64 {
    if width == 0 {
        return 0.0;
    }
    f64::from(height) * IMAGE_WIDTH_MM / f64::from(width)
}

/// Vertical image offset (mm from the page top) on each page.
///
/// The first entry is always [`FIRST_PAGE_OFFSET_MM`]; later entries are
/// negative so the image is shifted up to reveal its next slice.
#[must_use]
pub fn page_offsets(image_height: f64) -> Vec<f64> {
    let mut offsets = vec![FIRST_PAGE_OFFSET_MM];
    let mut height_left = image_height - (PAGE_HEIGHT_MM - FIRST_PAGE_OFFSET_MM);
    while height_left >= 0.0 {
        offsets.push(height_left - image_height + MARGIN_MM);
        height_left -= PAGE_HEIGHT_MM;
    }
    offsets
}

/// Build a PDF showing `title` and `bitmap`.
///
/// # Errors
///
/// Returns `ExportError::EncodeFailed` if the bitmap cannot be JPEG-encoded.
pub fn render_document(title: &str, bitmap: &Bitmap) -> Result<Vec<u8>, ExportError> {
    let jpeg = bitmap.encode_jpeg()?;
    let image_height = image_height_mm(bitmap.width(), bitmap.height());
    let offsets = page_offsets(image_height);

    let mut writer = PdfWriter::default();
    let catalog = writer.reserve();
    let pages = writer.reserve();
    let font = writer.object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );
    let image = writer.stream(
        &format!(
            "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Filter /DCTDecode",
            bitmap.width(),
            bitmap.height()
        ),
        &jpeg,
    );

    let mut kids = Vec::with_capacity(offsets.len());
    for (index, offset) in offsets.iter().enumerate() {
        let mut content = String::new();
        if index == 0 {
            content.push_str(&title_operators(title));
        }
        content.push_str(&image_operators(*offset, image_height));
        let contents = writer.stream("", content.as_bytes());
        let page = writer.object(
            format!(
                "<< /Type /Page /Parent {pages} 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 {font} 0 R >> /XObject << /Im0 {image} 0 R >> >> /Contents {contents} 0 R >>",
                pt(PAGE_WIDTH_MM),
                pt(PAGE_HEIGHT_MM)
            )
            .into_bytes(),
        );
        kids.push(format!("{page} 0 R"));
    }

    writer.fill(
        pages,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            kids.len()
        )
        .into_bytes(),
    );
    writer.fill(
        catalog,
        format!("<< /Type /Catalog /Pages {pages} 0 R >>").into_bytes(),
    );
    Ok(writer.finish(catalog))
}

fn pt(mm: f64) -> String {
    format!("{:.2}", mm * POINTS_PER_MM)
}

fn title_operators(title: &str) -> String {
    let width_mm = text_width_pt(title, TITLE_SIZE_PT) / POINTS_PER_MM;
    let x = PAGE_WIDTH_MM / 2.0 - width_mm / 2.0;
    let y = PAGE_HEIGHT_MM - TITLE_BASELINE_MM;
    format!(
        "BT /F1 {TITLE_SIZE_PT} Tf {} {} Td ({}) Tj ET\n",
        pt(x),
        pt(y),
        escape_pdf_text(title)
    )
}

fn image_operators(offset: f64, image_height: f64) -> String {
    let bottom = PAGE_HEIGHT_MM - offset - image_height;
    format!(
        "q {} 0 0 {} {} {} cm /Im0 Do Q\n",
        pt(IMAGE_WIDTH_MM),
        pt(image_height),
        pt(MARGIN_MM),
        pt(bottom)
    )
}

fn text_width_pt(text: &str, size: f64) -> f64 {
    let units: u32 = text
        .chars()
        .map(|ch| {
            u32::from(ch)
                .checked_sub(32)
                .and_then(|i| usize::try_from(i).ok())
                .and_then(|i| HELVETICA_WIDTHS.get(i))
                .map_or(556, |&width| u32::from(width))
        })
        .sum();
    f64::from(units) * size / 1000.0
}

fn escape_pdf_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                escaped.push('\\');
                escaped.push(ch);
            }
            printable if printable.is_ascii() && !printable.is_ascii_control() => {
                escaped.push(printable);
            }
            _ => escaped.push('?'),
        }
    }
    escaped
}

/// Sequential object writer producing a classic cross-reference table.
#[derive(Debug, Default)]
struct PdfWriter {
    objects: Vec<Option<Vec<u8>>>,
}

impl PdfWriter {
    fn reserve(&mut self) -> usize {
        self.objects.push(None);
        self.objects.len()
    }

    fn fill(&mut self, id: usize, body: Vec<u8>) {
        if let Some(slot) = id.checked_sub(1).and_then(|i| self.objects.get_mut(i)) {
            *slot = Some(body);
        }
    }

    fn object(&mut self, body: Vec<u8>) -> usize {
        self.objects.push(Some(body));
        self.objects.len()
    }

    fn stream(&mut self, dictionary: &str, data: &[u8]) -> usize {
        let mut body = format!("<< {dictionary} /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(body)
    }

    fn finish(self, root: usize) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(self.objects.len());
        for (index, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body.as_deref().unwrap_or(b"null"));
            out.extend_from_slice(b"\nendobj\n");
        }
        let xref = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", offsets.len() + 1).as_bytes());
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {root} 0 R >>\nstartxref\n{xref}\n%%EOF\n",
                self.objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }
}
