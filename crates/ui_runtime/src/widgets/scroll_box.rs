//! Scroll box - a sliding window over a chain of members
//!
//! Members are child nodes stacked along one axis. Only the members in the
//! visible window `[start, end]` are shown; the rest are hidden. A member is
//! part of the window while its leading edge lies inside the available size,
//! or while fewer than `min_visible_count` members are shown.

use std::ops::RangeInclusive;

use crate::events::UiEventKind;
use crate::foundation::math::{Vec2, Vec4};
use crate::layout::ParentAlignments;
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::tree::{NodeId, UiTree};
use super::{Arranging, Clickable, Drawable, QuadEmitter, Sizable};

/// Stacking direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAxis {
    /// Top to bottom
    #[default]
    Vertical,
    /// Left to right
    Horizontal,
}

/// One member of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMember {
    /// Member node, a child of the scroll box
    pub node: NodeId,
    /// Disabled members are skipped and hidden
    pub enabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScrollRequest {
    By(i32),
    ToStart(usize),
    ToEnd(usize),
}

/// Scrolling container
#[derive(Debug, Clone)]
pub struct ScrollBox {
    /// Stacking direction
    pub axis: ScrollAxis,
    /// Gap between consecutive members
    pub spacing: f32,
    /// Never show fewer members than this while enough are enabled
    pub min_visible_count: usize,
    /// Nominal size along the axis; zero shows every member
    pub max_size: f32,
    /// Optional background fill
    pub background: Option<Vec4>,

    members: Vec<ScrollMember>,
    spans: Vec<f32>,
    window: Option<(usize, usize)>,
    pending: Vec<ScrollRequest>,
    reported: Option<(usize, usize)>,
}

impl Default for ScrollBox {
    fn default() -> Self {
        Self::new(ScrollAxis::Vertical, 0.0)
    }
}

impl ScrollBox {
    /// Create an empty scroll box
    pub fn new(axis: ScrollAxis, max_size: f32) -> Self {
        Self {
            axis,
            spacing: 0.0,
            min_visible_count: 1,
            max_size: if max_size.is_finite() { max_size.max(0.0) } else { 0.0 },
            background: None,
            members: Vec::new(),
            spans: Vec::new(),
            window: None,
            pending: Vec::new(),
            reported: None,
        }
    }

    /// Builder: spacing and minimum visible count
    pub fn with_spacing(mut self, spacing: f32, min_visible_count: usize) -> Self {
        self.spacing = if spacing.is_finite() { spacing.max(0.0) } else { 0.0 };
        self.min_visible_count = min_visible_count;
        self
    }

    /// Members in chain order
    pub fn members(&self) -> &[ScrollMember] {
        &self.members
    }

    /// Append a member; the node must also be registered under the box
    pub fn push_member(&mut self, node: NodeId) {
        if !self.contains(node) {
            self.members.push(ScrollMember { node, enabled: true });
        }
    }

    /// Insert a member at a chain position
    pub fn insert_member(&mut self, index: usize, node: NodeId) {
        if !self.contains(node) {
            let index = index.min(self.members.len());
            self.members.insert(index, ScrollMember { node, enabled: true });
        }
    }

    /// Drop a member from the chain; false if it wasn't a member
    pub fn remove_member(&mut self, node: NodeId) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member.node != node);
        before != self.members.len()
    }

    /// Enable or disable a member
    pub fn set_member_enabled(&mut self, node: NodeId, enabled: bool) -> bool {
        match self.members.iter_mut().find(|member| member.node == node) {
            Some(member) => {
                member.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// True if `node` is in the chain
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.iter().any(|member| member.node == node)
    }

    /// First visible member index
    pub fn start(&self) -> usize {
        self.window.map_or(0, |(start, _)| start)
    }

    /// Last visible member index
    pub fn end(&self) -> usize {
        self.window.map_or(0, |(_, end)| end)
    }

    /// Visible member indices, `None` when nothing is shown
    pub fn visible_range(&self) -> Option<RangeInclusive<usize>> {
        self.window.map(|(start, end)| start..=end)
    }

    /// Scroll by whole members; positive moves towards the end
    ///
    /// Applied during the next size pass, once member sizes are settled.
    pub fn scroll_by(&mut self, steps: i32) {
        self.pending.push(ScrollRequest::By(steps));
    }

    /// Make `index` the first visible member, as far as the chain allows
    pub fn scroll_to_start(&mut self, index: usize) {
        self.pending.push(ScrollRequest::ToStart(index));
    }

    /// Make `index` the last visible member, as far as the chain allows
    pub fn scroll_to_end(&mut self, index: usize) {
        self.pending.push(ScrollRequest::ToEnd(index));
    }

    /// Member sizes along the axis, `None` for disabled members
    fn chain(&self) -> Vec<Option<f32>> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, member)| member.enabled.then(|| self.spans.get(i).copied().unwrap_or(0.0)))
            .collect()
    }

    fn available(&self) -> f32 {
        if self.max_size > 0.0 { self.max_size } else { f32::INFINITY }
    }

    fn apply(&mut self, request: ScrollRequest) {
        let chain = self.chain();
        let start = match request {
            ScrollRequest::By(steps) => step_enabled(&chain, self.start(), steps),
            ScrollRequest::ToStart(index) => index,
            ScrollRequest::ToEnd(index) => {
                window_to_end(&chain, index, self.available(), self.spacing, self.min_visible_count)
                    .map_or(0, |(start, _)| start)
            }
        };
        self.settle(&chain, start);
    }

    /// Clamp `start` to the last valid start and recompute the window
    fn settle(&mut self, chain: &[Option<f32>], start: usize) {
        let available = self.available();
        let Some(last) = chain.iter().rposition(Option::is_some) else {
            self.window = None;
            return;
        };
        let max_start = window_to_end(chain, last, available, self.spacing, self.min_visible_count)
            .map_or(0, |(start, _)| start);

        self.window = window_from_start(chain, start.min(max_start), available, self.spacing, self.min_visible_count);
    }

    fn along(&self, size: Vec2) -> f32 {
        match self.axis {
            ScrollAxis::Vertical => size.y,
            ScrollAxis::Horizontal => size.x,
        }
    }

    fn across(&self, size: Vec2) -> f32 {
        match self.axis {
            ScrollAxis::Vertical => size.x,
            ScrollAxis::Horizontal => size.y,
        }
    }
}

/// Sum of member sizes with spacing between them
fn extent<'a>(sizes: impl Iterator<Item = &'a f32>, spacing: f32) -> f32 {
    let mut total = 0.0;
    let mut count = 0;
    for size in sizes {
        total += size;
        count += 1;
    }
    if count > 1 { total + spacing * (count - 1) as f32 } else { total }
}

/// Window starting at the first enabled member at or after `start`
fn window_from_start(
    chain: &[Option<f32>],
    start: usize,
    available: f32,
    spacing: f32,
    min_count: usize,
) -> Option<(usize, usize)> {
    let mut window: Option<(usize, usize)> = None;
    let mut extent = 0.0;
    let mut count = 0;

    for (index, size) in chain.iter().enumerate().skip(start) {
        let Some(size) = size else {
            continue;
        };
        let lead = if count > 0 { extent + spacing } else { 0.0 };
        if count >= min_count.max(1) && lead >= available {
            break;
        }
        extent = lead + size;
        count += 1;
        window = Some((window.map_or(index, |(first, _)| first), index));
    }
    window
}

/// Window ending at the last enabled member at or before `end`
fn window_to_end(
    chain: &[Option<f32>],
    end: usize,
    available: f32,
    spacing: f32,
    min_count: usize,
) -> Option<(usize, usize)> {
    let last = end.min(chain.len().checked_sub(1)?);
    let mut window: Option<(usize, usize)> = None;
    let mut extent = 0.0;
    let mut count = 0;

    for index in (0..=last).rev() {
        let Some(size) = chain[index] else {
            continue;
        };
        let lead = if count > 0 { extent + spacing } else { 0.0 };
        if count >= min_count.max(1) && lead >= available {
            break;
        }
        extent = lead + size;
        count += 1;
        window = Some((index, window.map_or(index, |(_, last)| last)));
    }
    window
}

/// Index `steps` enabled members away from `from`, clamped to the chain
fn step_enabled(chain: &[Option<f32>], from: usize, steps: i32) -> usize {
    let enabled: Vec<usize> = chain.iter().enumerate().filter_map(|(i, s)| s.map(|_| i)).collect();
    let Some(&first) = enabled.first() else {
        return 0;
    };
    let position = enabled.iter().position(|&i| i >= from).unwrap_or(enabled.len() - 1);
    let target = (position as i64 + i64::from(steps)).clamp(0, enabled.len() as i64 - 1);
    enabled.get(target as usize).copied().unwrap_or(first)
}

impl Sizable for ScrollBox {
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        self.members.retain(|member| tree.parent(member.node) == Some(id));

        let mut across: f32 = 0.0;
        self.spans = self
            .members
            .iter()
            .map(|member| {
                let size = tree.get(member.node).map(|entry| entry.placement.local_size()).unwrap_or_default();
                if member.enabled {
                    across = across.max(self.across(size));
                }
                self.along(size)
            })
            .collect();

        let chain = self.chain();
        let start = self.start();
        self.settle(&chain, start);
        for request in std::mem::take(&mut self.pending) {
            self.apply(request);
        }

        let visible: Vec<f32> = self
            .visible_range()
            .map(|range| range.filter_map(|i| chain[i]).collect())
            .unwrap_or_default();
        let shown = extent(visible.iter(), self.spacing);
        let forced = extent(visible.iter().take(self.min_visible_count), self.spacing);
        let length = if self.max_size > 0.0 { self.max_size.max(forced) } else { shown };

        if let Some(entry) = tree.get_mut(id) {
            let size = &mut entry.placement.unscaled_size;
            match self.axis {
                ScrollAxis::Vertical => {
                    size.x = across;
                    size.y = length;
                }
                ScrollAxis::Horizontal => {
                    size.x = length;
                    size.y = across;
                }
            }
        }
    }
}

impl Arranging for ScrollBox {
    fn arrange(&mut self, _id: NodeId, tree: &mut UiTree) {
        let chain = self.chain();
        let mut offset = 0.0;

        for (index, member) in self.members.iter().enumerate() {
            let shown = member.enabled && self.window.is_some_and(|(start, end)| (start..=end).contains(&index));
            let _ = tree.set_visible(member.node, shown);
            if !shown {
                continue;
            }

            let Some(entry) = tree.get_mut(member.node) else {
                continue;
            };
            let placement = &mut entry.placement;
            let scale = if placement.scale > 0.0 { placement.scale } else { 1.0 };
            match self.axis {
                ScrollAxis::Vertical => {
                    placement.parent_alignment.remove(
                        ParentAlignments::TOP | ParentAlignments::BOTTOM | ParentAlignments::INNER_V,
                    );
                    placement.parent_alignment.insert(ParentAlignments::TOP | ParentAlignments::INNER_V);
                    placement.offset.y = -offset / scale;
                }
                ScrollAxis::Horizontal => {
                    placement.parent_alignment.remove(
                        ParentAlignments::LEFT | ParentAlignments::RIGHT | ParentAlignments::INNER_H,
                    );
                    placement.parent_alignment.insert(ParentAlignments::LEFT | ParentAlignments::INNER_H);
                    placement.offset.x = offset / scale;
                }
            }
            offset += chain[index].unwrap_or(0.0) + self.spacing;
        }
    }
}

impl Drawable for ScrollBox {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        if let Some(color) = self.background {
            out.fill(MaterialId::SOLID, color);
        }
    }
}

impl Clickable for ScrollBox {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        let scroll = ctx.input.scroll;
        let over = ctx.arbiter.owner().is_some_and(|owner| tree.is_within(id, owner));
        if over && scroll != 0.0 && scroll.is_finite() {
            // Wheel up reveals earlier members
            let steps = -(scroll.signum() * scroll.abs().ceil()) as i32;
            self.apply(ScrollRequest::By(steps));
        }

        let now = self.window.unwrap_or((0, 0));
        if self.reported.is_some_and(|previous| previous != now) {
            ctx.events.send(id, UiEventKind::Scrolled { start: now.0, end: now.1 });
        }
        self.reported = Some(now);
    }
}
