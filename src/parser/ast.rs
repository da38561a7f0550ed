// AST (Abstract Syntax Tree) definitions for scopeview

use std::fmt;

/// Character offset of the token a node starts at
pub type Offset = usize;

/// Node kinds, named the way the outline view prints them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    Block,
    Assignment,
    IfStatement,
    FunctionDef,
    ReturnStatement,
    FunctionCall,
    BinaryOp,
    Identifier,
    Number,
    String,
    Parameter,
    ParamList,
    Empty,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Program => "program",
            NodeKind::Block => "block",
            NodeKind::Assignment => "assignment",
            NodeKind::IfStatement => "if_statement",
            NodeKind::FunctionDef => "function_def",
            NodeKind::ReturnStatement => "return_statement",
            NodeKind::FunctionCall => "function_call",
            NodeKind::BinaryOp => "binary_op",
            NodeKind::Identifier => "identifier",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Parameter => "parameter",
            NodeKind::ParamList => "param_list",
            NodeKind::Empty => "empty",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinOp::Add,
            "-" => BinOp::Sub,
            "*" => BinOp::Mul,
            "/" => BinOp::Div,
            "==" => BinOp::Eq,
            "!=" => BinOp::Ne,
            "<" => BinOp::Lt,
            "<=" => BinOp::Le,
            ">" => BinOp::Gt,
            ">=" => BinOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Body of an `if`, `else` or `def`: at most one statement, parsed in its own scope
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statement: Option<Box<AstNode>>,
    pub offset: Offset,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub offset: Offset,
}

/// Parenthesized parameter list of a `def`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamList {
    pub params: Vec<Param>,
    pub offset: Offset,
}

impl ParamList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// AST nodes representing statements and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    // Statements
    Assignment {
        name: String,
        value: Box<AstNode>,
        offset: Offset,
    },
    If {
        condition: Box<AstNode>,
        then_block: Block,
        else_block: Option<Block>,
        offset: Offset,
    },
    FunctionDef {
        name: String,
        params: ParamList,
        body: Block,
        offset: Offset,
    },
    Return {
        value: Option<Box<AstNode>>,
        offset: Offset,
    },

    // Expressions
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
        offset: Offset,
    },
    BinaryOp {
        op: BinOp,
        left: Box<AstNode>,
        right: Box<AstNode>,
        offset: Offset,
    },
    Identifier(String, Offset),
    /// Raw digit text, never converted to a numeric type
    Number(String, Offset),
    /// Raw text including the quote characters
    StringLiteral(String, Offset),

    /// Produced for a statement at end of input; never attached to a parent
    Empty,
}

impl AstNode {
    pub fn kind(&self) -> NodeKind {
        match self {
            AstNode::Assignment { .. } => NodeKind::Assignment,
            AstNode::If { .. } => NodeKind::IfStatement,
            AstNode::FunctionDef { .. } => NodeKind::FunctionDef,
            AstNode::Return { .. } => NodeKind::ReturnStatement,
            AstNode::FunctionCall { .. } => NodeKind::FunctionCall,
            AstNode::BinaryOp { .. } => NodeKind::BinaryOp,
            AstNode::Identifier(..) => NodeKind::Identifier,
            AstNode::Number(..) => NodeKind::Number,
            AstNode::StringLiteral(..) => NodeKind::String,
            AstNode::Empty => NodeKind::Empty,
        }
    }

    /// The literal carried by the node: a name, an operator symbol, or raw text.
    pub fn value(&self) -> Option<&str> {
        match self {
            AstNode::Assignment { .. } => Some("="),
            AstNode::FunctionDef { name, .. } | AstNode::FunctionCall { name, .. } => {
                Some(name)
            }
            AstNode::BinaryOp { op, .. } => Some(op.symbol()),
            AstNode::Identifier(text, _)
            | AstNode::Number(text, _)
            | AstNode::StringLiteral(text, _) => Some(text),
            AstNode::If { .. } | AstNode::Return { .. } | AstNode::Empty => None,
        }
    }

    /// Offset of the token the node starts at. `Empty` has none.
    pub fn offset(&self) -> Option<Offset> {
        match self {
            AstNode::Assignment { offset, .. }
            | AstNode::If { offset, .. }
            | AstNode::FunctionDef { offset, .. }
            | AstNode::Return { offset, .. }
            | AstNode::FunctionCall { offset, .. }
            | AstNode::BinaryOp { offset, .. } => Some(*offset),
            AstNode::Identifier(_, offset)
            | AstNode::Number(_, offset)
            | AstNode::StringLiteral(_, offset) => Some(*offset),
            AstNode::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, AstNode::Empty)
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<AstNode>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Flatten the tree into indented rows, parents before children, children
    /// in source order. This is the order renderers must display.
    pub fn outline(&self) -> Vec<OutlineRow> {
        let mut rows = Vec::new();
        rows.push(OutlineRow::new(0, NodeKind::Program, None));
        for statement in &self.statements {
            outline_node(statement, 1, &mut rows);
        }
        rows
    }
}

/// One line of the outline view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRow {
    pub depth: usize,
    pub kind: NodeKind,
    pub value: Option<String>,
}

impl OutlineRow {
    fn new(depth: usize, kind: NodeKind, value: Option<&str>) -> Self {
        Self {
            depth,
            kind,
            value: value.map(str::to_string),
        }
    }
}

impl fmt::Display for OutlineRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: '{}'", self.kind, value),
            None => write!(f, "{}", self.kind),
        }
    }
}

fn outline_block(block: &Block, depth: usize, rows: &mut Vec<OutlineRow>) {
    rows.push(OutlineRow::new(depth, NodeKind::Block, None));
    if let Some(statement) = &block.statement {
        outline_node(statement, depth + 1, rows);
    }
}

fn outline_node(node: &AstNode, depth: usize, rows: &mut Vec<OutlineRow>) {
    if node.is_empty() {
        return;
    }
    rows.push(OutlineRow::new(depth, node.kind(), node.value()));

    let child = depth + 1;
    match node {
        AstNode::Assignment { name, value, .. } => {
            rows.push(OutlineRow::new(child, NodeKind::Identifier, Some(name)));
            outline_node(value, child, rows);
        }
        AstNode::If {
            condition,
            then_block,
            else_block,
            ..
        } => {
            outline_node(condition, child, rows);
            outline_block(then_block, child, rows);
            if let Some(else_block) = else_block {
                outline_block(else_block, child, rows);
            }
        }
        AstNode::FunctionDef { params, body, .. } => {
            rows.push(OutlineRow::new(child, NodeKind::ParamList, None));
            for param in &params.params {
                rows.push(OutlineRow::new(
                    child + 1,
                    NodeKind::Parameter,
                    Some(&param.name),
                ));
            }
            outline_block(body, child, rows);
        }
        AstNode::Return { value, .. } => {
            if let Some(value) = value {
                outline_node(value, child, rows);
            }
        }
        AstNode::FunctionCall { args, .. } => {
            for arg in args {
                outline_node(arg, child, rows);
            }
        }
        AstNode::BinaryOp { left, right, .. } => {
            outline_node(left, child, rows);
            outline_node(right, child, rows);
        }
        AstNode::Identifier(..)
        | AstNode::Number(..)
        | AstNode::StringLiteral(..)
        | AstNode::Empty => {}
    }
}
