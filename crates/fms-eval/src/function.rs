//! The `Function` trait every worksheet function implements, and its
//! capability flags.

use std::borrow::Cow;

use fms_common::{ArgSpec, ExcelError, ExcelErrorKind, LiteralValue};

use crate::context::AddinContext;

bitflags::bitflags! {
    /// Describes how a function behaves when called from a sheet.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FnCaps: u8 {
        /// Same output for the same input, no side effects.
        const PURE           = 0b0000_0001;
        /// Recalculated on every sheet change.
        const VOLATILE       = 0b0000_0010;
        /// Creates objects; must not be called during a plain recalculation.
        const UNCALCED       = 0b0000_0100;
        /// May mutate an in-memory array when given its handle.
        const COMMAND        = 0b0000_1000;
        /// Returns a handle rather than a value.
        const RETURNS_HANDLE = 0b0001_0000;
    }
}

/// Object-safe worksheet function.
pub trait Function: Send + Sync + 'static {
    fn caps(&self) -> FnCaps {
        FnCaps::PURE
    }

    fn name(&self) -> &'static str;

    fn min_args(&self) -> usize {
        0
    }

    fn variadic(&self) -> bool {
        false
    }

    fn volatile(&self) -> bool {
        self.caps().contains(FnCaps::VOLATILE)
    }

    fn arg_schema(&self) -> &'static [ArgSpec] {
        &[]
    }

    /// One-line description shown in the function wizard.
    fn help(&self) -> &'static str {
        ""
    }

    fn max_args(&self) -> usize {
        if self.variadic() {
            usize::MAX
        } else {
            self.arg_schema().len().max(self.min_args())
        }
    }

    /// Evaluate with arguments already checked against `min_args`/`max_args`
    /// and padded with `Empty` up to the schema length.
    fn eval(&self, args: &[LiteralValue], ctx: &mut AddinContext)
    -> Result<LiteralValue, ExcelError>;

    /// Check arity, pad optional arguments and evaluate.
    fn dispatch(
        &self,
        args: &[LiteralValue],
        ctx: &mut AddinContext,
    ) -> Result<LiteralValue, ExcelError> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("dispatch", name = self.name(), argc = args.len()).entered();

        if args.len() < self.min_args() || args.len() > self.max_args() {
            return Err(ExcelError::new(ExcelErrorKind::Value).with_message(format!(
                "{} expects {} argument(s), got {}",
                self.name(),
                arity_text(self.min_args(), self.max_args()),
                args.len()
            )));
        }
        let schema = self.arg_schema().len();
        let args: Cow<'_, [LiteralValue]> = if args.len() < schema {
            let mut padded = args.to_vec();
            padded.resize(schema, LiteralValue::Empty);
            Cow::Owned(padded)
        } else {
            Cow::Borrowed(args)
        };
        let out = self.eval(&args, ctx);

        #[cfg(feature = "tracing")]
        if let Err(e) = &out {
            tracing::debug!(error = %e, "function returned an error");
        }
        out
    }
}

fn arity_text(min: usize, max: usize) -> String {
    if max == usize::MAX {
        format!("at least {min}")
    } else if min == max {
        min.to_string()
    } else {
        format!("{min} to {max}")
    }
}
