use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::path::Path;

/// Builds a multi-page A4 table document with the base Helvetica font.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    next_id: i32,
    font_id: Ref,
    bold_font_id: Ref,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Base fonts use WinAnsi; anything outside printable ASCII is replaced.
fn pdf_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '→' => '>',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            _ => '?',
        })
        .map(|c| c as u8)
        .collect()
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let bold_font_id = Ref::new(4);
        let next_id = 5;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_font_id).base_font(Name(b"Helvetica-Bold"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,

            next_id,
            font_id,
            bold_font_id,

            font_size: 10.0,
            header_font_size: 10.5,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        let mut resources = page.resources();
        let mut fonts = resources.fonts();
        fonts.pair(Name(b"F1"), self.font_id);
        fonts.pair(Name(b"F2"), self.bold_font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id.take() {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn draw_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
        text: &str,
    ) {
        let font = if bold { Name(b"F2") } else { Name(b"F1") };
        let bytes = pdf_text(text);
        content.begin_text();
        content.set_font(font, size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(&bytes));
        content.end_text();
    }

    /// Approximate Helvetica advance width; good enough for column layout.
    fn text_width(text: &str, size: f32) -> f32 {
        text.chars()
            .map(|c| match c {
                '0'..='9' | '.' | ' ' | '-' | ':' | '/' => 0.556,
                'A'..='Z' => 0.667,
                _ => 0.5,
            })
            .sum::<f32>()
            * size
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray + 0.03);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    /// Text columns are left aligned, numeric ones (every column but
    /// `left_cols`) right aligned.
    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        left_cols: &[usize],
        header: bool,
    ) {
        let size = if header {
            self.header_font_size
        } else {
            self.font_size
        };
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            let tx = if header || left_cols.contains(&i) {
                x + 4.0
            } else {
                x + w - 4.0 - Self::text_width(text, size)
            };
            self.draw_text(content, tx, y + 6.0, size, header, text);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths from header and content, scaled down to fit the page.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers
            .iter()
            .map(|h| Self::text_width(h, self.header_font_size) + 10.0)
            .collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(Self::text_width(cell, self.font_size) + 10.0);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(
        &self,
        content: &mut Content,
        title: &str,
        subtitle: &str,
        page: usize,
        pages: usize,
    ) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 10.0,
            self.title_font_size,
            true,
            title,
        );

        if !subtitle.is_empty() {
            self.draw_text(
                content,
                self.margin,
                self.page_h - self.margin - 6.0,
                self.font_size,
                false,
                subtitle,
            );
        }

        let pg = format!("Page {page} of {pages}");
        self.draw_text(
            content,
            self.page_w - self.margin - Self::text_width(&pg, self.font_size),
            self.margin - 30.0,
            self.font_size,
            false,
            &pg,
        );
    }

    fn rows_per_page(&self) -> usize {
        let top = self.page_h - self.margin - 40.0;
        let usable = top - self.row_h - self.margin;
        ((usable / self.row_h).floor() as usize).max(1)
    }

    /// Multi-page table under a title. The header row is repeated on every
    /// page; an empty `rows` still produces one page with the header.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: &str,
        headers: &[&str],
        rows: &[Vec<String>],
        left_cols: &[usize],
    ) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_w: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        let per_page = self.rows_per_page();
        let chunks: Vec<&[Vec<String>]> = if rows.is_empty() {
            vec![rows]
        } else {
            rows.chunks(per_page).collect()
        };
        let pages = chunks.len();

        for (page_idx, chunk) in chunks.into_iter().enumerate() {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, subtitle, page_idx + 1, pages);

            let mut y = self.page_h - self.margin - 40.0;

            self.fill_band(&mut content, y, table_w, 0.85);
            self.draw_row(&mut content, y, &col_widths, &header_row, left_cols, true);
            y -= self.row_h;

            for (i, row) in chunk.iter().enumerate() {
                // zebra stripe
                if i % 2 == 0 {
                    self.fill_band(&mut content, y, table_w, 0.96);
                }
                self.draw_row(&mut content, y, &col_widths, row, left_cols, false);
                y -= self.row_h;
            }

            self.finalize_page(content);
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Close the document tree and return the encoded bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.iter().copied());
        drop(pages);
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.finish())
    }
}
