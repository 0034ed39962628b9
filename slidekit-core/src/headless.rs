//! Recording host with synthetic geometry.

use std::collections::BTreeMap;
use std::ops::Range;

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::host::{ContainerTransform, HostCommand, SlideHost};

/// A host without a renderer.
///
/// Slides have configurable heights (cycled across clones); image loads
/// stay pending until [`HeadlessHost::finish_image_loads`].
#[derive(Debug)]
pub struct HeadlessHost {
    slide_count: usize,
    container: bool,
    outer_width: f64,
    inner_width: Option<f64>,
    heights: Vec<f64>,
    /// Real slide shown at each extended position.
    sources: Vec<usize>,
    /// Unloaded images per real slide.
    images: BTreeMap<usize, usize>,
    waiters: Vec<oneshot::Sender<()>>,
    commands: Vec<HostCommand>,
}

impl HeadlessHost {
    pub fn new(slide_count: usize, outer_width: f64) -> Self {
        Self {
            slide_count,
            container: true,
            outer_width,
            inner_width: None,
            heights: vec![100.0],
            sources: (0..slide_count).collect(),
            images: BTreeMap::new(),
            waiters: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// A host whose slide container is missing.
    pub fn without_container() -> Self {
        Self {
            container: false,
            ..Self::new(0, 0.0)
        }
    }

    pub fn with_inner_width(mut self, width: f64) -> Self {
        self.inner_width = Some(width);
        self
    }

    /// Heights of the real slides; repeated when shorter than the slide list.
    pub fn with_heights(mut self, heights: Vec<f64>) -> Self {
        if !heights.is_empty() {
            self.heights = heights;
        }
        self
    }

    pub fn with_images(mut self, slide: usize, count: usize) -> Self {
        self.images.insert(slide, count);
        self
    }

    pub fn set_outer_width(&mut self, width: f64) {
        self.outer_width = width;
    }

    pub fn set_inner_width(&mut self, width: Option<f64>) {
        self.inner_width = width;
    }

    /// Resolve every pending image load.
    pub fn finish_image_loads(&mut self) {
        self.images.clear();
        for waiter in self.waiters.drain(..) {
            let _ = waiter.send(());
        }
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Last container transform written.
    pub fn transform(&self) -> Option<&ContainerTransform> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetTransform { transform } => Some(transform),
            _ => None,
        })
    }

    /// Last inner wrapper height written; `None` when never set or cleared.
    pub fn inner_height(&self) -> Option<f64> {
        self.commands.iter().rev().find_map(|c| match c {
            HostCommand::SetInnerHeight { px } => Some(Some(*px)),
            HostCommand::ClearInnerHeight => Some(None),
            _ => None,
        })?
    }

    pub fn count(&self, pred: impl Fn(&HostCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn height_of(&self, slide: usize) -> f64 {
        let real = self.sources.get(slide).copied().unwrap_or(slide);
        self.heights[real % self.heights.len()]
    }
}

impl SlideHost for HeadlessHost {
    fn has_container(&self) -> bool {
        self.container
    }

    fn slide_count(&self) -> usize {
        self.slide_count
    }

    fn outer_width(&self) -> f64 {
        self.outer_width
    }

    fn inner_width(&self) -> f64 {
        self.inner_width.unwrap_or(self.outer_width)
    }

    fn slide_offset_tops(&self) -> Vec<f64> {
        let mut tops = Vec::with_capacity(self.sources.len());
        let mut top = 0.0;
        for slide in 0..self.sources.len() {
            tops.push(top);
            top += self.height_of(slide);
        }
        tops
    }

    fn slide_height(&self, slide: usize) -> f64 {
        self.height_of(slide)
    }

    fn pending_image_loads(&mut self, slides: Range<usize>) -> Vec<LocalBoxFuture<'static, ()>> {
        let mut loads = Vec::new();
        for slide in slides {
            let Some(real) = self.sources.get(slide).copied() else {
                continue;
            };
            let pending = self.images.get(&real).copied().unwrap_or(0);
            for _ in 0..pending {
                let (tx, rx) = oneshot::channel();
                self.waiters.push(tx);
                loads.push(rx.map(|_| ()).boxed_local());
            }
        }
        loads
    }

    fn apply(&mut self, command: HostCommand) {
        match &command {
            HostCommand::InstallClones { before, after } => {
                let mut sources = before.clone();
                sources.extend(0..self.slide_count);
                sources.extend(after.iter().copied());
                self.sources = sources;
            }
            HostCommand::Restore => {
                self.sources = (0..self.slide_count).collect();
            }
            _ => {}
        }
        self.commands.push(command);
    }
}
