//! Helper trait to apply parsed values positionally.

/// Marker trait for types that can turn an ordered list of values into
/// something else.
///
/// This is used by [`map_to()`](crate::schema::Fields::map_to) so the provided
/// closures and functions can take each parsed value as separate argument
/// instead of deconstructing tuples.
///
/// There are implementations for [`Fn`] closures with 1 up to 12 arguments
/// taking tuples, and for closures taking a single [`Vec`] or array.
pub trait Constructor<In, Out> {
    /// Take the input and convert it into output.
    fn construct(&self, input: In) -> Out;
}

impl<A, Out, Func> Constructor<(A,), Out> for Func
where
    Func: Fn(A) -> Out,
{
    fn construct(&self, (a,): (A,)) -> Out {
        self(a)
    }
}

macro_rules! impl_constructor {
    ($($elem:ident),+) => {
        impl< $( $elem ),+ , Out, Func> Constructor<($( $elem ),+), Out> for Func
        where
            Func: Fn( $( $elem ),+ ) -> Out,
        {
            #[allow(non_snake_case)]
            fn construct(&self, ( $( $elem ),+ ): ( $( $elem ),+ )) -> Out {
                self( $( $elem ),+ )
            }
        }
    };
}

impl_constructor!(A, B);
impl_constructor!(A, B, C);
impl_constructor!(A, B, C, D);
impl_constructor!(A, B, C, D, E);
impl_constructor!(A, B, C, D, E, F);
impl_constructor!(A, B, C, D, E, F, G);
impl_constructor!(A, B, C, D, E, F, G, H);
impl_constructor!(A, B, C, D, E, F, G, H, I);
impl_constructor!(A, B, C, D, E, F, G, H, I, J);
impl_constructor!(A, B, C, D, E, F, G, H, I, J, K);
impl_constructor!(A, B, C, D, E, F, G, H, I, J, K, L);

impl<T, Out, Func> Constructor<Vec<T>, Out> for Func
where
    Func: Fn(Vec<T>) -> Out,
{
    fn construct(&self, values: Vec<T>) -> Out {
        self(values)
    }
}

impl<T, Out, Func, const N: usize> Constructor<[T; N], Out> for Func
where
    Func: Fn([T; N]) -> Out,
{
    fn construct(&self, values: [T; N]) -> Out {
        self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<In, Out>(constructor: impl Constructor<In, Out>, input: In) -> Out {
        constructor.construct(input)
    }

    #[test]
    fn should_spread_tuple_into_arguments() {
        let joined = apply(
            |a: u8, b: char, c: &str| format!("{a}{b}{c}"),
            (4, '-', "x"),
        );

        assert_eq!(joined, "4-x");
    }

    #[test]
    fn should_call_reusable_constructor_repeatedly() {
        let double = |n: u32| n * 2;

        assert_eq!(double.construct((2,)), 4);
        assert_eq!(double.construct((5,)), 10);
    }

    #[test]
    fn should_pass_lists_whole() {
        let sum = apply(|values: [u8; 3]| values.iter().sum::<u8>(), [1, 2, 3]);

        assert_eq!(sum, 6);
    }
}
