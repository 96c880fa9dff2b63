//! Flat numeric cascade layout.
//!
//! ```text
//! cascade = [min_width, min_height, stage...]
//! stage   = [stage_threshold, node_count, node...]
//! node    = [tilted, rect_count, rect..., node_threshold, left, right]
//! rect    = [x, y, width, height, weight]
//! ```
//!
//! Stages run until the sequence is exhausted. Declared counts are checked
//! against the remaining length before anything is allocated, so a corrupt
//! header fails with [`CascadeError::Truncated`] instead of reading past the
//! end.
use super::{CascadeDescriptor, CascadeNode, CascadeStage, HaarRect};
use crate::error::CascadeError;

const RECT_LEN: usize = 5;
// tilted + rect_count + threshold + left + right
const NODE_MIN_LEN: usize = 5;

struct FlatReader<'a> {
    values: &'a [f64],
    pos: usize,
}

impl<'a> FlatReader<'a> {
    fn remaining(&self) -> usize {
        self.values.len() - self.pos
    }

    fn is_done(&self) -> bool {
        self.pos >= self.values.len()
    }

    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [f64], CascadeError> {
        if self.remaining() < n {
            return Err(CascadeError::Truncated {
                context,
                offset: self.pos,
                needed: n,
                len: self.values.len(),
            });
        }
        let out = &self.values[self.pos..self.pos + n];
        for (i, &v) in out.iter().enumerate() {
            if !v.is_finite() {
                return Err(CascadeError::NonFiniteValue {
                    context,
                    value: v,
                    offset: self.pos + i,
                });
            }
        }
        self.pos += n;
        Ok(out)
    }

    fn value(&mut self, context: &'static str) -> Result<f64, CascadeError> {
        Ok(self.take(1, context)?[0])
    }

    /// A declared element count whose elements need at least `min_len`
    /// values each.
    fn count(&mut self, what: &'static str, min_len: usize) -> Result<usize, CascadeError> {
        let offset = self.pos;
        let value = self.value(what)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(CascadeError::InvalidCount {
                what,
                value,
                offset,
            });
        }
        let count = value as usize;
        let needed = count.saturating_mul(min_len);
        if needed > self.remaining() {
            return Err(CascadeError::Truncated {
                context: what,
                offset: self.pos,
                needed,
                len: self.values.len(),
            });
        }
        Ok(count)
    }
}

impl CascadeDescriptor {
    /// Decode the flat layout used by trained cascade files.
    pub fn from_flat(values: &[f64]) -> Result<Self, CascadeError> {
        let mut reader = FlatReader { values, pos: 0 };
        let header = reader.take(2, "window size")?;
        let (min_width, min_height) = (header[0], header[1]);
        if min_width <= 0.0 || min_height <= 0.0 {
            return Err(CascadeError::InvalidWindowSize {
                width: min_width,
                height: min_height,
            });
        }

        let mut stages = Vec::new();
        while !reader.is_done() {
            stages.push(read_stage(&mut reader)?);
        }
        if stages.is_empty() {
            log::warn!("cascade has no stages; every window will be accepted");
        }

        Ok(Self {
            min_width,
            min_height,
            stages,
        })
    }

    /// Encode back into the flat layout accepted by [`Self::from_flat`].
    pub fn to_flat(&self) -> Vec<f64> {
        let mut out = vec![self.min_width, self.min_height];
        for stage in &self.stages {
            out.push(stage.threshold);
            out.push(stage.nodes.len() as f64);
            for node in &stage.nodes {
                out.push(if node.tilted { 1.0 } else { 0.0 });
                out.push(node.rects.len() as f64);
                for r in &node.rects {
                    out.extend_from_slice(&[r.x, r.y, r.width, r.height, r.weight]);
                }
                out.extend_from_slice(&[node.threshold, node.left, node.right]);
            }
        }
        out
    }
}

fn read_stage(reader: &mut FlatReader<'_>) -> Result<CascadeStage, CascadeError> {
    let threshold = reader.value("stage threshold")?;
    let node_count = reader.count("node", NODE_MIN_LEN)?;
    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        nodes.push(read_node(reader)?);
    }
    Ok(CascadeStage { threshold, nodes })
}

fn read_node(reader: &mut FlatReader<'_>) -> Result<CascadeNode, CascadeError> {
    let tilted = reader.value("tilted flag")? != 0.0;
    let rect_count = reader.count("rect", RECT_LEN)?;
    let mut rects = Vec::with_capacity(rect_count);
    for _ in 0..rect_count {
        let r = reader.take(RECT_LEN, "rect")?;
        rects.push(HaarRect {
            x: r[0],
            y: r[1],
            width: r[2],
            height: r[3],
            weight: r[4],
        });
    }
    let tail = reader.take(3, "node decision")?;
    Ok(CascadeNode {
        tilted,
        rects,
        threshold: tail[0],
        left: tail[1],
        right: tail[2],
    })
}
