// Request handlers for the /api surface. All routes here sit behind the
// gateway identity middleware and receive an AuthUser extension.

pub mod navigation;
