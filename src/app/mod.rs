// Application layer: concrete pipelines wired from core stages.

pub mod pipelines;
