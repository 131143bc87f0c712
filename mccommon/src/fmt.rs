macro_rules! impl_fmt {
    (($ty:ty, $inner:ty), $tr:path) => {
        impl $tr for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                <$inner as $tr>::fmt(&self.0, f)
            }
        }
    };
    (($ty:ty, $inner:ty), $($tr:path),+) => {
        $(
            impl_fmt!(($ty, $inner), $tr);
        )+
    }
}

pub(crate) use impl_fmt;
