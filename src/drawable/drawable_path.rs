use super::render_context::*;
use crate::fill::*;
use crate::geometry::*;
use crate::relative::*;
use crate::tree::*;

use std::cell::{RefCell, Ref};

///
/// Where a drawable path's geometry comes from
///
#[derive(Clone, Debug)]
enum PathSource {
    /// The concrete path is the ground truth
    Static,

    /// The concrete path is a cache derived from a relative path, whose
    /// anchor-dependent points may move without a direct edit
    Dynamic(RelativePointPath)
}

///
/// Derived geometry, rebuilt lazily. The stroke outline always depends on the
/// path, so rebuilding the path marks the stroke for rebuilding too; the
/// stroke can also be marked on its own after a style-only change.
///
#[derive(Debug)]
struct GeometryCache {
    source:                 PathSource,
    path:                   GeometryPath,
    path_needs_updating:    bool,
    stroke:                 GeometryPath,
    stroke_needs_updating:  bool
}

impl GeometryCache {
    ///
    /// Brings the concrete path up to date. This clears the path dirty flag
    /// even for a static source, where the path was supplied directly and is
    /// already the ground truth.
    ///
    fn update_path(&mut self, resolver: &dyn CoordinateResolver) {
        if self.path_needs_updating {
            self.path_needs_updating = false;

            if let PathSource::Dynamic(relative_path) = &self.source {
                self.path = relative_path.create_path(resolver);
                self.stroke_needs_updating = true;
            }
        }
    }

    ///
    /// Brings the stroke outline up to date (updating the path first, as the
    /// stroke is generated from it)
    ///
    fn update_stroke(&mut self, stroke_type: &StrokeStyle, resolver: &dyn CoordinateResolver) {
        if self.stroke_needs_updating {
            self.stroke_needs_updating = false;

            self.update_path(resolver);
            self.stroke = self.path.stroke_outline(stroke_type);
        }
    }
}

///
/// A drawable filled and stroked vector path.
///
/// The concrete outline and its stroke outline are derived state, recomputed
/// lazily: read accessors take `&self` and update hidden caches as needed, so
/// the drawable is single threaded by design (callers perform all mutation
/// and rendering on one thread).
///
/// Anything that can resolve coordinates is borrowed per call and never
/// retained, as anchors may move between calls.
///
pub struct DrawablePath {
    name:           String,
    main_fill:      FillStyle,
    stroke_fill:    FillStyle,
    stroke_type:    StrokeStyle,
    cache:          RefCell<GeometryCache>
}

impl DrawablePath {
    ///
    /// Creates an empty drawable path with black fills and no stroke
    ///
    pub fn new() -> DrawablePath {
        DrawablePath {
            name:           String::new(),
            main_fill:      FillStyle::default(),
            stroke_fill:    FillStyle::default(),
            stroke_type:    StrokeStyle::new(0.0),
            cache:          RefCell::new(GeometryCache {
                source:                 PathSource::Static,
                path:                   GeometryPath::new(),
                path_needs_updating:    false,
                stroke:                 GeometryPath::new(),
                stroke_needs_updating:  true
            })
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    //
    // Edits
    //

    ///
    /// Supplies the concrete path directly. The path becomes the ground truth,
    /// so any relative path is discarded; only the stroke needs regenerating.
    ///
    pub fn set_path(&mut self, new_path: GeometryPath) {
        let cache = self.cache.get_mut();

        cache.source                = PathSource::Static;
        cache.path                  = new_path;
        cache.path_needs_updating   = false;
        cache.stroke_needs_updating = true;
    }

    pub fn set_fill(&mut self, new_fill: FillStyle) {
        self.main_fill = new_fill;
    }

    pub fn fill(&self) -> &FillStyle {
        &self.main_fill
    }

    pub fn set_stroke_fill(&mut self, new_fill: FillStyle) {
        self.stroke_fill = new_fill;
    }

    pub fn stroke_fill(&self) -> &FillStyle {
        &self.stroke_fill
    }

    pub fn set_stroke_type(&mut self, new_stroke_type: StrokeStyle) {
        self.stroke_type = new_stroke_type;
        self.cache.get_mut().stroke_needs_updating = true;
    }

    pub fn stroke_type(&self) -> &StrokeStyle {
        &self.stroke_type
    }

    pub fn set_stroke_thickness(&mut self, new_thickness: f64) {
        self.set_stroke_type(self.stroke_type.with_thickness(new_thickness));
    }

    ///
    /// Marks the geometry as out of date because anchors the relative path
    /// depends on may have moved
    ///
    pub fn invalidate_points(&mut self) {
        let cache = self.cache.get_mut();

        cache.path_needs_updating   = true;
        cache.stroke_needs_updating = true;
    }

    //
    // Reading the geometry
    //

    ///
    /// The concrete outline of this path, up to date with the last edit
    ///
    pub fn path(&self, resolver: &dyn CoordinateResolver) -> Ref<GeometryPath> {
        self.cache.borrow_mut().update_path(resolver);

        Ref::map(self.cache.borrow(), |cache| &cache.path)
    }

    ///
    /// The outline produced by stroking this path with its stroke descriptor
    ///
    pub fn stroke_path(&self, resolver: &dyn CoordinateResolver) -> Ref<GeometryPath> {
        self.cache.borrow_mut().update_stroke(&self.stroke_type, resolver);

        Ref::map(self.cache.borrow(), |cache| &cache.stroke)
    }

    ///
    /// True if the stroke would produce visible output (it has thickness and
    /// its fill is not fully transparent)
    ///
    pub fn is_stroke_visible(&self) -> bool {
        self.stroke_type.thickness > 0.0 && !self.stroke_fill.is_invisible()
    }

    ///
    /// The bounds of everything this drawable can touch: the stroke outline
    /// when it is visible (it always extends at least as far as the fill),
    /// the fill outline otherwise
    ///
    pub fn bounds(&self, resolver: &dyn CoordinateResolver) -> Rect {
        if self.is_stroke_visible() {
            self.stroke_path(resolver).bounds()
        } else {
            self.path(resolver).bounds()
        }
    }

    ///
    /// True if the point is inside the fill, or inside the stroke outline when
    /// the stroke is visible
    ///
    pub fn hit_test(&self, x: f64, y: f64, resolver: &dyn CoordinateResolver) -> bool {
        self.path(resolver).contains(x, y)
            || (self.is_stroke_visible() && self.stroke_path(resolver).contains(x, y))
    }

    //
    // Rendering
    //

    ///
    /// Renders this drawable through the context's backend, composing the
    /// context's opacity and transform into each fill
    ///
    pub fn render(&self, context: &mut RenderingContext, resolver: &dyn CoordinateResolver) {
        let fill = self.main_fill
            .with_multiplied_opacity(context.opacity)
            .transformed_by(&context.transform);

        context.renderer.set_fill_style(&fill);
        context.renderer.fill_path(&*self.path(resolver), &context.transform);

        if self.is_stroke_visible() {
            let stroke_fill = self.stroke_fill
                .with_multiplied_opacity(context.opacity)
                .transformed_by(&context.transform);

            context.renderer.set_fill_style(&stroke_fill);
            context.renderer.fill_path(&*self.stroke_path(resolver), &context.transform);
        }
    }

    ///
    /// Creates an independent copy of this drawable. Copies are structural:
    /// they share no cache state, and derived geometry is regenerated on
    /// demand.
    ///
    pub fn create_copy(&self) -> DrawablePath {
        self.clone()
    }

    //
    // Tree synchronization
    //

    ///
    /// Updates this drawable to match the tree's current content, returning
    /// the smallest rectangle that must be redrawn (the empty rectangle if
    /// nothing visually changed).
    ///
    /// Note that a fill-only change reports the drawable's current bounds as
    /// damage: only a path or stroke descriptor change captures the bounds
    /// from before the edit as well.
    ///
    pub fn refresh_from_value_tree(&mut self, tree: &ValueTree, images: &dyn ImageProvider, resolver: &dyn CoordinateResolver) -> Rect {
        let mut damage_rect = Rect::empty();
        let state           = PathState::from(tree.clone());

        self.name = state.id();

        let mut needs_redraw = false;

        let new_fill = state.main_fill(images);
        if self.main_fill != new_fill {
            needs_redraw    = true;
            self.main_fill  = new_fill;
        }

        let new_stroke_fill = state.stroke_fill(images);
        if self.stroke_fill != new_stroke_fill {
            needs_redraw        = true;
            self.stroke_fill    = new_stroke_fill;
        }

        let new_stroke_type     = state.stroke_style();

        // Re-resolve the tree's relative path once to get the candidate path
        let new_relative_path   = RelativePointPath::from_tree(&state);
        let new_path            = new_relative_path.create_path(resolver);

        let path_changed        = self.stroke_type != new_stroke_type || self.cache.borrow().path != new_path;

        if path_changed {
            // Damage covers the bounds before the path changes as well as after
            damage_rect = self.bounds(resolver);

            {
                let cache = self.cache.get_mut();
                cache.path                  = new_path;
                cache.path_needs_updating   = false;
                cache.stroke_needs_updating = true;
            }

            self.stroke_type    = new_stroke_type;
            needs_redraw        = true;
        }

        // An all-constant relative path degenerates to a static path, so
        // future invalidations don't re-resolve points that cannot move
        self.cache.get_mut().source = if new_relative_path.contains_any_dynamic_points() {
            PathSource::Dynamic(new_relative_path)
        } else {
            PathSource::Static
        };

        if needs_redraw {
            damage_rect = damage_rect.union(self.bounds(resolver));
        }

        damage_rect
    }

    ///
    /// Builds a fresh tree node describing this drawable. Whether the edits
    /// that attach it anywhere are undoable is the caller's concern, so no
    /// undo manager participates here.
    ///
    pub fn create_value_tree(&self, images: &dyn ImageProvider) -> ValueTree {
        let tree    = ValueTree::new(PATH_NODE);
        let state   = PathState::from(tree.clone());

        state.set_id(&self.name, None);
        state.set_main_fill(&self.main_fill, images, None);
        state.set_stroke_fill(&self.stroke_fill, images, None);
        state.set_stroke_style(&self.stroke_type, None);

        let cache = self.cache.borrow();
        match &cache.source {
            PathSource::Dynamic(relative_path) => {
                relative_path.write_to_tree(&state, None);
            }

            PathSource::Static => {
                // Reuse the segment encoding by treating every concrete point
                // as a constant relative point
                RelativePointPath::from_geometry(&cache.path).write_to_tree(&state, None);
            }
        }

        tree
    }
}

impl Clone for DrawablePath {
    fn clone(&self) -> DrawablePath {
        let cache = self.cache.borrow();

        let copied_cache = match &cache.source {
            PathSource::Static => GeometryCache {
                source:                 PathSource::Static,
                path:                   cache.path.clone(),
                path_needs_updating:    false,
                stroke:                 GeometryPath::new(),
                stroke_needs_updating:  true
            },

            PathSource::Dynamic(relative_path) => GeometryCache {
                source:                 PathSource::Dynamic(relative_path.clone()),
                path:                   GeometryPath::new(),
                path_needs_updating:    true,
                stroke:                 GeometryPath::new(),
                stroke_needs_updating:  true
            }
        };

        DrawablePath {
            name:           self.name.clone(),
            main_fill:      self.main_fill.clone(),
            stroke_fill:    self.stroke_fill.clone(),
            stroke_type:    self.stroke_type,
            cache:          RefCell::new(copied_cache)
        }
    }
}
