// src/services/report_generator.rs
//
// Renders the downloadable resume PDF from the graph dataset. Generated once
// at startup into public/, where ServeDir picks it up for the
// `download_resume` action target.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use printpdf::*;

use super::resume::ResumeGraph;
use crate::message::RESUME_PDF_ROUTE;

const SECTION_HUBS: [&str; 3] = ["experience", "skills", "projects"];

/// Filesystem path the PDF is written to, derived from the route the
/// `download_resume` action points at so the two cannot drift.
fn resume_pdf_path() -> PathBuf {
    PathBuf::from(format!("public{RESUME_PDF_ROUTE}"))
}

pub async fn generate_resume_pdf(graph: &ResumeGraph) -> std::io::Result<()> {
    let pdf_path = resume_pdf_path();
    if let Some(dir) = pdf_path.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    // PDF layout is CPU work; keep it off the async runtime.
    let graph = graph.clone();
    tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        let (doc, page1, layer1) =
            PdfDocument::new("Kumar Gyanam - Resume", Mm(210.0), Mm(297.0), "Layer 1");
        let current_layer = doc.get_page(page1).get_layer(layer1);

        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(io_err)?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(io_err)?;

        let mut y = 275.0;
        current_layer.use_text("Kumar Gyanam", 22.0, Mm(20.0), Mm(y), &font_bold);
        y -= 7.0;
        current_layer.use_text(
            "Chief AI Architect | AI Strategy Leader | DVP - Conversational AI",
            11.0,
            Mm(20.0),
            Mm(y),
            &font,
        );
        y -= 12.0;

        for hub_id in SECTION_HUBS {
            let Some(hub) = graph.node(hub_id) else { continue };
            current_layer.use_text(hub.name.clone(), 14.0, Mm(20.0), Mm(y), &font_bold);
            y -= 7.0;

            for node in graph.neighbors(hub_id) {
                // Hub-to-hub links are navigation aids, not section entries.
                if SECTION_HUBS.contains(&node.id.as_str()) {
                    continue;
                }
                let line = format!("{}: {}", node.name, truncate(&node.desc, 110));
                current_layer.use_text(line, 9.0, Mm(24.0), Mm(y), &font);
                y -= 5.5;
            }
            y -= 5.0;
        }

        current_layer.use_text(
            "LinkedIn: linkedin.com/in/kumar-gyanam  |  Email: gyanamc@gmail.com  |  Portfolio: gyanam.store",
            9.0,
            Mm(20.0),
            Mm(15.0),
            &font,
        );

        let file = File::create(&pdf_path)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer).map_err(io_err)
    })
    .await
    .map_err(io_err)??;

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

fn io_err<E: std::fmt::Display>(err: E) -> std::io::Error {
    std::io::Error::other(err.to_string())
}
