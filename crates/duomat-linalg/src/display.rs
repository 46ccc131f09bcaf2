//! Textual rendering of matrices.

use std::fmt;

use duomat_core::Scalar;

use crate::matrix::Matrix;

/// Layout for [`Matrix::render`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderStyle {
    /// Tabular form with 1-based column headers, a rule and row labels.
    Indexed,
    /// Bracketed rows of right-aligned values.
    Literal,
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }

        write!(f, "[")?;
        for i in 0..self.rows {
            if i > 0 {
                write!(f, ",\n ")?;
            }
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.at(i, j))?;
            }
            write!(f, "]")?;
        }
        write!(f, "]")
    }
}

impl<T: Scalar> Matrix<T> {
    /// Renders the matrix with every value right-aligned in a field of
    /// `width` characters.
    #[must_use]
    pub fn render(&self, style: RenderStyle, width: usize) -> String {
        match style {
            RenderStyle::Indexed => self.render_indexed(width),
            RenderStyle::Literal => self.render_literal(width),
        }
    }

    fn render_indexed(&self, w: usize) -> String {
        let margin = " ".repeat(w);
        let mut out = margin.clone();
        for j in 1..=self.cols {
            out.push_str(&format!("{j:>w$} "));
        }
        out.push('\n');

        out.push_str(&margin);
        out.push_str(&"-".repeat((w + 1) * self.cols));
        out.push('\n');

        let label = w.saturating_sub(1);
        for i in 0..self.rows {
            out.push_str(&format!("{:<label$}|", i + 1));
            for j in 0..self.cols {
                out.push_str(&format!("{:>w$} ", self.at(i, j)));
            }
            out.push('\n');
        }
        out
    }

    fn render_literal(&self, w: usize) -> String {
        let mut out = String::new();
        for i in 0..self.rows {
            out.push(if i == 0 { '[' } else { ' ' });
            for j in 0..self.cols {
                out.push_str(&format!("{:>w$} ", self.at(i, j)));
            }
            out.push(if i + 1 == self.rows { ']' } else { ',' });
            out.push('\n');
        }
        out
    }
}
