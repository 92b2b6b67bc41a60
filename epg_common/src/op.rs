/// Implements the standard arithmetic operator traits for transparent newtype wrappers.
#[macro_export]
macro_rules! op {
    (binary $type:ty, $op:ident, $method:ident) => {
        impl $op for $type {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Self(self.0.$method(rhs.0))
            }
        }
    };
    (inplace $type:ty, $op:ident, $method:ident) => {
        impl $op for $type {
            fn $method(&mut self, rhs: Self) {
                self.0.$method(rhs.0);
            }
        }
    };
}
