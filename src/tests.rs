use crate::{attrs, fd, fds, fd::FdSet, schema::Schema};
use once_cell::sync::Lazy;

/// Schema {A B C} with A -> B and A -> C; already in BCNF.
pub(crate) static STAR: Lazy<(Schema, FdSet)> = Lazy::new(|| {
    (
        Schema::new(attrs!("A" "B" "C")).unwrap(),
        fds![fd!("A" => "B"), fd!("A" => "C")],
    )
});

/// Schema {A B C} with A -> B and B -> C; B -> C violates BCNF.
pub(crate) static CHAIN: Lazy<(Schema, FdSet)> = Lazy::new(|| {
    (
        Schema::new(attrs!("A" "B" "C")).unwrap(),
        fds![fd!("A" => "B"), fd!("B" => "C")],
    )
});

/// Course scheduling example; the only minimal key is {hour student}.
pub(crate) static COURSES: Lazy<(Schema, FdSet)> = Lazy::new(|| {
    (
        Schema::new(attrs!("course" "grade" "hour" "room" "student" "teacher")).unwrap(),
        fds![
            fd!("course" => "teacher"),
            fd!("hour" "room" => "course"),
            fd!("hour" "teacher" => "room"),
            fd!("course" "student" => "grade"),
            fd!("hour" "student" => "room"),
        ],
    )
});
