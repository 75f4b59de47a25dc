use std::collections::HashMap;
use super::{
    element::{Command, Element, Paint, PathData, Shape},
    point::UnitPoint,
    viewport::Viewport,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The ordered collection of drawn elements, with the map from identity to element.
///
/// Insertion order is rendering order. Upserting an element whose identity already exists
/// replaces that element in place, keeping its position.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scene {
    elements: Vec<Element>,
    ids: HashMap<String, usize>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Scene {
        Scene::default()
    }

    /// Creates a scene from elements in rendering order. If several elements share an identity,
    /// the last one is the one addressed by it.
    pub fn from_elements(elements: Vec<Element>) -> Scene {
        let ids = elements.iter()
            .enumerate()
            .filter_map(|(index, element)| element.id.clone().map(|id| (id, index)))
            .collect();
        Scene { elements, ids }
    }

    /// Adds an element, or replaces the element with the same identity. Returns the index of the
    /// element.
    pub fn upsert(&mut self, element: Element) -> usize {
        if let Some(index) = element.id.as_ref().and_then(|id| self.ids.get(id)).copied() {
            self.elements[index] = element;
            return index;
        }

        let index = self.elements.len();
        if let Some(id) = &element.id {
            self.ids.insert(id.clone(), index);
        }
        self.elements.push(element);
        index
    }

    /// Returns the element with the given identity.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.ids.get(id).map(|index| &self.elements[*index])
    }

    /// Returns the elements, in rendering order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.ids.clear();
    }
}

/// Collects many line segments into a single path element.
///
/// Create one with [`Picture::begin_batch`], add segments with [`Batch::segment`], and emit it
/// with [`Picture::end_batch`].
///
/// [`Picture::begin_batch`]: super::Picture::begin_batch
/// [`Picture::end_batch`]: super::Picture::end_batch
#[derive(Clone, Debug)]
pub struct Batch {
    viewport: Viewport,
    commands: Vec<Command>,
}

impl Batch {
    pub(crate) fn new(viewport: Viewport) -> Batch {
        Batch {
            viewport,
            commands: Vec::new(),
        }
    }

    /// Adds the segment from `p` to `q`, in unit coordinates.
    pub fn segment(&mut self, p: UnitPoint, q: UnitPoint) {
        self.commands.push(Command::MoveTo(self.viewport.to_device(p)));
        self.commands.push(Command::LineTo(self.viewport.to_device(q)));
    }

    /// Returns the number of segments in the batch.
    pub fn len(&self) -> usize {
        self.commands.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Turns the batch into one path element with the given paint.
    pub(crate) fn into_element(self, paint: Paint) -> Element {
        Element::new(Shape::Path(PathData::Commands(self.commands)), paint)
    }
}
