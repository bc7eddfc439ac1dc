use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Axis, AxisLimit, AxisOrientation, Bounds, SharedAxisGroup};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::CartesianChart;

/// Indices of the axes in `group`, in declaration order.
pub(super) fn group_members(axes: &[Axis], group: SharedAxisGroup) -> SmallVec<[usize; 4]> {
    axes.iter()
        .enumerate()
        .filter(|(_, axis)| axis.options().shared_group == Some(group))
        .map(|(index, _)| index)
        .collect()
}

/// Unions the bounds of every shared group so linked axes scale alike.
pub(super) fn share_group_bounds(axes: &mut [Axis]) {
    let mut groups: IndexMap<SharedAxisGroup, (Bounds, Bounds)> = IndexMap::new();
    for axis in axes.iter() {
        if let Some(group) = axis.options().shared_group {
            let (data, visible) = groups
                .entry(group)
                .or_insert_with(|| (Bounds::empty(), Bounds::empty()));
            data.append_bounds(axis.data_bounds());
            visible.append_bounds(axis.visible_data_bounds());
        }
    }
    if groups.is_empty() {
        return;
    }
    for axis in axes.iter_mut() {
        if let Some((data, visible)) = axis
            .options()
            .shared_group
            .and_then(|group| groups.get(&group).copied())
        {
            *axis.data_bounds_mut() = data;
            *axis.visible_data_bounds_mut() = visible;
        }
    }
}

impl<R: Renderer> CartesianChart<R> {
    /// Limits snapshot of one axis, unioned with its shared-group members.
    pub fn axis_limit(&self, orientation: AxisOrientation, index: usize) -> ChartResult<AxisLimit> {
        let axes = self.axes(orientation);
        let axis = self.axis(orientation, index)?;
        let own = axis.own_limit();
        let Some(group) = axis.options().shared_group else {
            return Ok(own);
        };
        Ok(group_members(axes, group)
            .into_iter()
            .filter(|member| *member != index)
            .fold(own, |limit, member| limit.union(axes[member].own_limit())))
    }

    /// Sets user limits on one axis. With `propagate`, shared-group members are
    /// updated first so the whole group ends with identical limits.
    pub fn set_axis_limits(
        &mut self,
        orientation: AxisOrientation,
        index: usize,
        min: f64,
        max: f64,
        propagate: bool,
    ) -> ChartResult<()> {
        if !min.is_finite() || !max.is_finite() {
            return Err(ChartError::InvalidData(
                "axis limits must be finite".to_owned(),
            ));
        }
        let group = self.axis(orientation, index)?.options().shared_group;

        if propagate {
            if let Some(group) = group {
                for member in group_members(self.axes(orientation), group) {
                    if member != index {
                        self.set_axis_limits(orientation, member, min, max, false)?;
                    }
                }
            }
        }

        let axis = &mut self.axes_mut(orientation)[index];
        axis.set_limits(min, max);
        trace!(
            axis = %axis.display_name(),
            min,
            max,
            propagate,
            "axis limits set"
        );
        self.invalidate();
        Ok(())
    }

    /// Clears user limits on one axis and, with `propagate`, on its group.
    pub fn reset_axis_limits(
        &mut self,
        orientation: AxisOrientation,
        index: usize,
        propagate: bool,
    ) -> ChartResult<()> {
        let group = self.axis(orientation, index)?.options().shared_group;
        let members = match (propagate, group) {
            (true, Some(group)) => group_members(self.axes(orientation), group),
            _ => SmallVec::from_slice(&[index]),
        };
        for member in members {
            self.axes_mut(orientation)[member].reset_limits();
        }
        self.invalidate();
        Ok(())
    }
}
