//! Production sheet export.
//!
//! Renders the active shot list into a standalone HTML document for
//! download. This is a pure projection of the session with no feedback into
//! orchestrator state.

use storygen_core::session::{Session, style_by_id};

/// Renders the session's shot list as a static production sheet.
pub fn production_sheet(session: &Session) -> String {
    let mut rows = String::new();
    for (index, shot) in session.shots.iter().enumerate() {
        let thumbnail = match &shot.image_url {
            Some(url) => format!(r#"<img src="{}" alt="Shot {}">"#, escape(url), index + 1),
            None => "&mdash;".to_string(),
        };
        rows.push_str(&format!(
            "<tr>\
             <td>{}</td>\
             <td class=\"thumb\">{}</td>\
             <td>{}</td>\
             <td>{}</td>\
             <td>{}</td>\
             <td>{}s</td>\
             </tr>\n",
            index + 1,
            thumbnail,
            escape(&shot.scene_description),
            escape(&shot.frame_description),
            escape(&shot.voice_text),
            shot.duration,
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n\
         <style>\n\
         body {{ font-family: sans-serif; margin: 2em; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border: 1px solid #ccc; padding: 8px; text-align: left; vertical-align: top; }}\n\
         td.thumb img {{ max-width: 160px; }}\n\
         </style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n\
         <p class=\"subtitle\">Style: {style}</p>\n\
         <table>\n\
         <thead><tr><th>#</th><th>Frame</th><th>Action</th><th>Direction</th><th>Dialogue</th><th>Duration</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n\
         </table>\n</body>\n</html>\n",
        title = escape(&session.title),
        style = escape(style_by_id(&session.config.style).name),
        rows = rows,
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
