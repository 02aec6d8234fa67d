//! Directory tree of a lesson's exercise files.

use std::path::{Component, Path, PathBuf};

use crate::Lesson;

/// An entry in an exercise tree. Entries keep the order in which they were
/// first seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExerciseNode {
    Directory {
        name: String,
        path: PathBuf,
        children: Vec<ExerciseNode>,
    },
    File {
        name: String,
        path: PathBuf,
    },
}

impl ExerciseNode {
    pub fn name(&self) -> &str {
        match self {
            ExerciseNode::Directory { name, .. } | ExerciseNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ExerciseNode::Directory { path, .. } | ExerciseNode::File { path, .. } => path,
        }
    }

    pub fn children(&self) -> &[ExerciseNode] {
        match self {
            ExerciseNode::Directory { children, .. } => children,
            ExerciseNode::File { .. } => &[],
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, ExerciseNode::Directory { .. })
    }
}

/// Exercise files laid out relative to their deepest common directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseTree {
    pub root: PathBuf,
    pub nodes: Vec<ExerciseNode>,
}

impl ExerciseTree {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Build the exercise tree for `lesson`.
pub fn exercise_tree(lesson: &Lesson) -> ExerciseTree {
    build_tree(&lesson.exercise_files())
}

/// Build a tree from already resolved file paths.
pub fn build_tree(files: &[PathBuf]) -> ExerciseTree {
    let Some(root) = common_directory(files) else {
        return ExerciseTree::default();
    };

    let mut nodes = Vec::new();
    for file in files {
        let Ok(relative) = file.strip_prefix(&root) else {
            continue;
        };
        let components: Vec<String> = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect();
        insert(&mut nodes, &root, &components);
    }

    ExerciseTree { root, nodes }
}

fn insert(nodes: &mut Vec<ExerciseNode>, base: &Path, components: &[String]) {
    let Some((name, rest)) = components.split_first() else {
        return;
    };
    let path = base.join(name);

    if rest.is_empty() {
        if !nodes.iter().any(|node| node.name() == name) {
            nodes.push(ExerciseNode::File {
                name: name.clone(),
                path,
            });
        }
        return;
    }

    let index = match nodes
        .iter()
        .position(|node| node.is_directory() && node.name() == name)
    {
        Some(index) => index,
        None => {
            nodes.push(ExerciseNode::Directory {
                name: name.clone(),
                path: path.clone(),
                children: Vec::new(),
            });
            nodes.len() - 1
        }
    };

    if let ExerciseNode::Directory { children, .. } = &mut nodes[index] {
        insert(children, &path, rest);
    }
}

/// Deepest directory containing every file.
fn common_directory(files: &[PathBuf]) -> Option<PathBuf> {
    let (first, rest) = files.split_first()?;
    let mut common: Vec<Component<'_>> = first.parent()?.components().collect();

    for file in rest {
        let directory: Vec<Component<'_>> = match file.parent() {
            Some(parent) => parent.components().collect(),
            None => Vec::new(),
        };
        let shared = common
            .iter()
            .zip(&directory)
            .take_while(|(a, b)| a == b)
            .count();
        common.truncate(shared);
    }

    Some(common.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(files: &[&str]) -> Vec<PathBuf> {
        files.iter().map(PathBuf::from).collect()
    }

    fn render(nodes: &[ExerciseNode], depth: usize, out: &mut String) {
        for node in nodes {
            let marker = if node.is_directory() { "/" } else { "" };
            out.push_str(&format!("{}{}{}\n", "  ".repeat(depth), node.name(), marker));
            render(node.children(), depth + 1, out);
        }
    }

    #[test]
    fn test_empty_input() {
        let tree = build_tree(&[]);
        assert!(tree.is_empty());
        assert_eq!(tree.root, PathBuf::new());
    }

    #[test]
    fn test_single_file_sits_in_its_directory() {
        let tree = build_tree(&paths(&["/course/loops/src/index.js"]));

        assert_eq!(tree.root, PathBuf::from("/course/loops/src"));
        assert_eq!(
            tree.nodes,
            [ExerciseNode::File {
                name: "index.js".to_string(),
                path: PathBuf::from("/course/loops/src/index.js"),
            }]
        );
    }

    #[test]
    fn test_nested_layout_and_order() {
        let tree = build_tree(&paths(&[
            "/course/loops/src/index.js",
            "/course/loops/src/lib/util.js",
            "/course/loops/README.md",
            "/course/loops/src/lib/math.js",
            "/course/loops/README.md",
        ]));

        assert_eq!(tree.root, PathBuf::from("/course/loops"));
        let mut out = String::new();
        render(&tree.nodes, 0, &mut out);
        insta::assert_snapshot!(out, @r"
        src/
          index.js
          lib/
            util.js
            math.js
        README.md
        ");

        let lib = &tree.nodes[0].children()[1];
        assert_eq!(lib.path(), Path::new("/course/loops/src/lib"));
    }

    #[test]
    fn test_common_root_is_component_wise() {
        // "/a/bc" and "/a/bd" share "/a", not "/a/b".
        let tree = build_tree(&paths(&["/a/bc/x.rs", "/a/bd/y.rs"]));
        assert_eq!(tree.root, PathBuf::from("/a"));
        assert_eq!(tree.nodes.len(), 2);
    }
}
