//! Conversion of a picture into an SVG document.

use ::svg::{
    node::element::{Circle, Ellipse, Path, Rectangle, Text},
    Document,
    Node,
};
use crate::picture::{
    element::{fmt_num, Element, Shape},
    Picture,
};
use std::io;

/// Assigns the identity and paint of the element to the node.
fn decorate<N: Node>(node: &mut N, element: &Element) {
    if let Some(id) = &element.id {
        node.assign("id", id.as_str());
    }

    let paint = &element.paint;
    if let Some(stroke) = &paint.stroke {
        node.assign("stroke", stroke.as_str());
    }
    if let Some(fill) = &paint.fill {
        node.assign("fill", fill.as_str());
    }
    if let Some(width) = paint.stroke_width {
        node.assign("stroke-width", fmt_num(width));
    }
    if let Some(dash) = &paint.dash {
        node.assign("stroke-dasharray", dash.as_str());
    }
}

/// Appends the element to the document, as a node of the matching kind.
fn append(document: &mut Document, element: &Element) {
    match &element.shape {
        Shape::Path(data) => {
            let mut node = Path::new().set("d", data.to_string());
            decorate(&mut node, element);
            document.append(node);
        },
        Shape::Circle { center, r } => {
            let mut node = Circle::new()
                .set("cx", fmt_num(center.0))
                .set("cy", fmt_num(center.1))
                .set("r", fmt_num(*r));
            decorate(&mut node, element);
            document.append(node);
        },
        Shape::Ellipse { center, rx, ry } => {
            let mut node = Ellipse::new()
                .set("cx", fmt_num(center.0))
                .set("cy", fmt_num(center.1))
                .set("rx", fmt_num(*rx))
                .set("ry", fmt_num(*ry));
            decorate(&mut node, element);
            document.append(node);
        },
        Shape::Rect { corner, width, height, rx, ry } => {
            let mut node = Rectangle::new()
                .set("x", fmt_num(corner.0))
                .set("y", fmt_num(corner.1))
                .set("width", fmt_num(*width))
                .set("height", fmt_num(*height));
            if let Some(rx) = rx {
                node.assign("rx", fmt_num(*rx));
            }
            if let Some(ry) = ry {
                node.assign("ry", fmt_num(*ry));
            }
            decorate(&mut node, element);
            document.append(node);
        },
        Shape::Text { position, content, anchor, font } => {
            let mut node = Text::new(content.clone())
                .set("x", fmt_num(position.0))
                .set("y", fmt_num(position.1))
                .set("text-anchor", anchor.to_string())
                .set("font-style", font.style.as_str())
                .set("font-family", font.family.as_str())
                .set("font-size", fmt_num(font.size))
                .set("font-weight", font.weight.as_str());
            decorate(&mut node, element);
            document.append(node);
        },
    }
}

/// Builds the SVG document of a picture.
///
/// The root element carries the canvas size as its `width` and `height`, along with the
/// viewport attributes `xmin`, `xmax`, `ymin`, `ymax`, `xunitlength`, `yunitlength`, `ox` and
/// `oy`, so that the picture can be resumed later. Elements appear in scene order.
pub fn to_document(picture: &Picture) -> Document {
    let vp = picture.viewport();
    let mut document = Document::new()
        .set("width", fmt_num(vp.width))
        .set("height", fmt_num(vp.height))
        .set("xmin", fmt_num(vp.xmin))
        .set("xmax", fmt_num(vp.xmax))
        .set("ymin", fmt_num(vp.ymin))
        .set("ymax", fmt_num(vp.ymax))
        .set("xunitlength", fmt_num(vp.xunitlength))
        .set("yunitlength", fmt_num(vp.yunitlength))
        .set("ox", fmt_num(vp.ox))
        .set("oy", fmt_num(vp.oy));

    for element in picture.scene().elements() {
        append(&mut document, element);
    }
    document
}

/// Writes the SVG document of a picture.
pub fn write<W: io::Write>(picture: &Picture, dest: W) -> io::Result<()> {
    ::svg::write(dest, &to_document(picture))
}

/// Saves the SVG document of a picture to a file.
pub fn save<P: AsRef<std::path::Path>>(picture: &Picture, path: P) -> io::Result<()> {
    ::svg::save(path, &to_document(picture))
}
