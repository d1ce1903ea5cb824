use super::SqlWriter;

macro_rules! emit {
    ($w:expr, $( $fragment:expr ),* $(,)?) => {{
        $(
            $fragment.emit($w);
        )*
    }};
}

pub(super) trait Emit {
    fn emit(self, w: &mut SqlWriter<'_>);
}

impl Emit for &str {
    fn emit(self, w: &mut SqlWriter<'_>) {
        w.dst.push_str(self);
    }
}

impl<T: Emit> Emit for Option<T> {
    fn emit(self, w: &mut SqlWriter<'_>) {
        if let Some(fragment) = self {
            fragment.emit(w);
        }
    }
}

impl<A: Emit, B: Emit> Emit for (A, B) {
    fn emit(self, w: &mut SqlWriter<'_>) {
        self.0.emit(w);
        self.1.emit(w);
    }
}
