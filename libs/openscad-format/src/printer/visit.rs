//! Per-node printing rules.

use super::Printer;
use openscad_ast::nodes::*;
use openscad_ast::token::{TokenKind, TokenRef};
use openscad_ast::visitor::Visitor;
use std::sync::Arc;
use tracing::trace;

// =============================================================================
// SHARED PIECES
// =============================================================================

impl<'c> Printer<'c> {
    /// Print bindings separated by `, `, dropping useless commas but keeping
    /// anything attached to them.
    fn assignments(&mut self, args: &[Arc<AssignmentNode>]) {
        for (i, arg) in args.iter().enumerate() {
            self.visit_assignment_node(arg);
            let last = i + 1 == args.len();
            let mut separated = last;
            for comma in &arg.tokens.trailing_commas {
                if separated {
                    self.silent(comma);
                } else {
                    self.glued(comma, ",");
                    separated = true;
                }
            }
            if !separated {
                self.write_glued(",");
            }
            if !last {
                self.space();
            }
        }
    }

    /// Print `(args)`.
    fn arguments(&mut self, args: &[Arc<AssignmentNode>], tokens: &ArgumentListTokens, glued: bool) {
        self.open(&tokens.open, "(", glued);
        for comma in &tokens.leading_commas {
            self.silent(comma);
        }
        self.assignments(args);
        self.close(&tokens.close, ")");
    }

    /// Print the statement a module instantiation, declaration or `if`
    /// applies to.
    fn child(&mut self, child: &Statement) {
        match child {
            Statement::Error(node) if node.tokens.is_empty() => {}
            Statement::Noop(noop) => self.glued(&noop.tokens.semicolon, ";"),
            Statement::Block(_) => {
                self.space();
                self.statement(child);
            }
            _ => {
                self.indent += 1;
                if self.in_chain && self.chain_broken && is_chain_link(child) {
                    self.request_newline("chain");
                } else {
                    self.space();
                }
                self.statement(child);
                self.indent -= 1;
            }
        }
    }

    /// Print one instantiation of a chain: tags, name, arguments, child.
    fn chain_link(&mut self, node: &ModuleInstantiationStmt) {
        for tag in &node.tokens.tags {
            self.lexeme(tag);
        }
        self.lexeme(&node.tokens.name);
        let spaced = matches!(node.tokens.name.kind, TokenKind::For | TokenKind::Let);
        if spaced {
            self.space();
        }
        self.arguments(&node.args, &node.tokens.args, !spaced);
        self.child(&node.child);
    }

    fn keyword_with_arguments(
        &mut self,
        keyword: &TokenRef,
        args: &[Arc<AssignmentNode>],
        tokens: &ArgumentListTokens,
    ) {
        self.lexeme(keyword);
        let spaced = matches!(keyword.kind, TokenKind::For | TokenKind::Let | TokenKind::Function);
        if spaced {
            self.space();
        }
        self.arguments(args, tokens, !spaced);
    }
}

fn is_chain_link(stmt: &Statement) -> bool {
    matches!(stmt, Statement::ModuleInstantiation(_) | Statement::IfElse(_))
}

// =============================================================================
// VISITOR
// =============================================================================

impl<'c> Visitor for Printer<'c> {
    type Output = ();

    fn visit_scad_file(&mut self, node: &ScadFile) {
        for stmt in &node.statements {
            self.statement(stmt);
            self.request_newline("statement");
        }
        self.extras(&node.tokens.eot);
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn visit_use_stmt(&mut self, node: &UseStmt) {
        self.file_import(&node.tokens);
    }

    fn visit_include_stmt(&mut self, node: &IncludeStmt) {
        self.file_import(&node.tokens);
    }

    fn visit_module_instantiation_stmt(&mut self, node: &ModuleInstantiationStmt) {
        if self.in_chain || !is_chain_link(&node.child) {
            self.chain_link(node);
            return;
        }

        let checkpoint = self.checkpoint();
        self.in_chain = true;
        self.chain_broken = false;
        self.measuring = true;
        self.chain_link(node);
        self.measuring = false;

        let width = self.first_line_width(&checkpoint);
        let limit = self.config.module_instantiation_break_length;
        let broken = width > limit;
        trace!(name = %node.name, width, limit, broken, "instantiation chain");
        self.restore(checkpoint);
        self.chain_broken = broken;
        self.chain_link(node);

        self.in_chain = false;
        self.chain_broken = false;
    }

    fn visit_module_declaration_stmt(&mut self, node: &ModuleDeclarationStmt) {
        self.lexeme(&node.tokens.module_keyword);
        self.space();
        self.lexeme(&node.tokens.name);
        self.arguments(&node.definition_args, &node.tokens.args, true);
        if self.config.definitions_only {
            self.write_glued(";");
        } else {
            self.child(&node.body);
        }
    }

    fn visit_function_declaration_stmt(&mut self, node: &FunctionDeclarationStmt) {
        self.lexeme(&node.tokens.function_keyword);
        self.space();
        self.lexeme(&node.tokens.name);
        self.arguments(&node.definition_args, &node.tokens.args, true);
        if self.config.definitions_only {
            self.write_glued(";");
            return;
        }
        self.space();
        self.token(&node.tokens.equals, "=");
        self.space();
        self.hanging_expression(&node.expr);
        self.glued(&node.tokens.semicolon, ";");
    }

    fn visit_block_stmt(&mut self, node: &BlockStmt) {
        let chain = (self.in_chain, self.chain_broken);
        self.in_chain = false;
        self.chain_broken = false;

        self.token(&node.tokens.open, "{");
        if node.children.is_empty() && !node.tokens.close.has_comment_before() {
            self.write_glued("}");
        } else if self.measuring {
            // The first line of a chain ends at this brace.
        } else {
            self.indent += 1;
            self.request_newline("block");
            for child in &node.children {
                self.statement(child);
                self.request_newline("statement");
            }
            self.extras(&node.tokens.close);
            self.indent -= 1;
            self.request_newline("block");
            self.write("}");
        }

        (self.in_chain, self.chain_broken) = chain;
    }

    fn visit_noop_stmt(&mut self, node: &NoopStmt) {
        self.glued(&node.tokens.semicolon, ";");
    }

    fn visit_if_else_statement(&mut self, node: &IfElseStatement) {
        for tag in &node.tokens.tags {
            self.lexeme(tag);
        }
        self.lexeme(&node.tokens.if_keyword);
        self.space();
        self.open(&node.tokens.open, "(", false);
        self.expression(&node.cond);
        self.close(&node.tokens.close, ")");
        self.child(&node.then_branch);

        if let (Some(keyword), Some(branch)) = (&node.tokens.else_keyword, &node.else_branch) {
            self.space();
            self.lexeme(keyword);
            self.child(branch);
        }
    }

    fn visit_assignment_node(&mut self, node: &AssignmentNode) {
        if let Some(name) = &node.tokens.name {
            self.lexeme(name);
        }
        if let Some(equals) = &node.tokens.equals {
            self.space();
            self.token(equals, "=");
            self.space();
        }
        if let Some(value) = &node.value {
            if node.tokens.semicolon.is_some() {
                self.hanging_expression(value);
            } else {
                self.expression(value);
            }
        }
        if let Some(semicolon) = &node.tokens.semicolon {
            self.glued(semicolon, ";");
        }
    }

    fn visit_error_node(&mut self, node: &ErrorNode) {
        let Some((first, rest)) = node.tokens.split_first() else {
            return;
        };
        self.lexeme(first);
        for token in rest {
            self.verbatim(token);
        }
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    fn visit_unary_op_expr(&mut self, node: &UnaryOpExpr) {
        self.token(&node.tokens.operator, node.operation.symbol());
        // `- -x` must not read as `--x`.
        let doubled = matches!(
            &node.right,
            Expression::UnaryOp(inner)
                if inner.operation == node.operation && node.operation != UnaryOperator::Not
        );
        if doubled {
            self.space();
        }
        self.expression(&node.right);
    }

    fn visit_binary_op_expr(&mut self, node: &BinaryOpExpr) {
        self.expression(&node.left);
        self.space();
        self.token(&node.tokens.operator, node.operation.symbol());
        self.space();
        self.expression(&node.right);
    }

    fn visit_ternary_expr(&mut self, node: &TernaryExpr) {
        self.expression(&node.cond);
        self.space();
        self.token(&node.tokens.question_mark, "?");
        self.space();
        self.expression(&node.if_expr);
        self.space();
        self.token(&node.tokens.colon, ":");
        self.space();
        self.expression(&node.else_expr);
    }

    fn visit_array_lookup_expr(&mut self, node: &ArrayLookupExpr) {
        self.expression(&node.array);
        self.open(&node.tokens.open, "[", true);
        self.expression(&node.index);
        self.close(&node.tokens.close, "]");
    }

    fn visit_literal_expr(&mut self, node: &LiteralExpr) {
        self.lexeme(&node.tokens.literal);
    }

    fn visit_range_expr(&mut self, node: &RangeExpr) {
        self.open(&node.tokens.open, "[", false);
        self.expression(&node.begin);
        self.glued(&node.tokens.first_colon, ":");
        if let (Some(step), Some(colon)) = (&node.step, &node.tokens.second_colon) {
            self.expression(step);
            self.glued(colon, ":");
        }
        self.expression(&node.end);
        self.close(&node.tokens.close, "]");
    }

    fn visit_vector_expr(&mut self, node: &VectorExpr) {
        self.open(&node.tokens.open, "[", false);
        for comma in &node.tokens.leading_commas {
            self.silent(comma);
        }
        let count = node.children.len();
        for (i, child) in node.children.iter().enumerate() {
            self.expression(child);
            let last = i + 1 == count;
            let commas = node.tokens.commas.get(i).map(Vec::as_slice).unwrap_or_default();
            let mut separated = last;
            for comma in commas {
                if separated {
                    self.silent(comma);
                } else {
                    self.glued(comma, ",");
                    separated = true;
                }
            }
            if !separated {
                self.write_glued(",");
            }
            if !last {
                self.space();
            }
        }
        self.close(&node.tokens.close, "]");
    }

    fn visit_lookup_expr(&mut self, node: &LookupExpr) {
        self.lexeme(&node.tokens.identifier);
    }

    fn visit_member_lookup_expr(&mut self, node: &MemberLookupExpr) {
        self.expression(&node.expr);
        self.glued(&node.tokens.dot, ".");
        self.lexeme(&node.tokens.member);
    }

    fn visit_function_call_expr(&mut self, node: &FunctionCallExpr) {
        self.expression(&node.callee);
        self.arguments(&node.args, &node.tokens, true);
    }

    fn visit_let_expr(&mut self, node: &LetExpr) {
        self.call_like(node);
    }

    fn visit_assert_expr(&mut self, node: &AssertExpr) {
        self.call_like(node);
    }

    fn visit_echo_expr(&mut self, node: &EchoExpr) {
        self.call_like(node);
    }

    fn visit_lc_if_expr(&mut self, node: &LcIfExpr) {
        self.lexeme(&node.tokens.if_keyword);
        self.space();
        self.open(&node.tokens.open, "(", false);
        self.expression(&node.cond);
        self.close(&node.tokens.close, ")");
        self.space();
        self.expression(&node.if_expr);
        if let (Some(keyword), Some(else_expr)) = (&node.tokens.else_keyword, &node.else_expr) {
            self.space();
            self.lexeme(keyword);
            self.space();
            self.expression(else_expr);
        }
    }

    fn visit_lc_each_expr(&mut self, node: &LcEachExpr) {
        self.lexeme(&node.tokens.each_keyword);
        self.space();
        self.expression(&node.expr);
    }

    fn visit_lc_for_expr(&mut self, node: &LcForExpr) {
        self.keyword_with_arguments(&node.tokens.for_keyword, &node.args, &node.tokens.args);
        self.space();
        self.expression(&node.expr);
    }

    fn visit_lc_for_c_expr(&mut self, node: &LcForCExpr) {
        let tokens = &node.tokens;
        self.lexeme(&tokens.for_keyword);
        self.space();
        self.open(&tokens.open, "(", false);
        for comma in &tokens.init_leading_commas {
            self.silent(comma);
        }
        self.assignments(&node.args);
        self.glued(&tokens.first_semicolon, ";");
        self.space();
        self.expression(&node.cond);
        self.glued(&tokens.second_semicolon, ";");
        self.space();
        for comma in &tokens.incr_leading_commas {
            self.silent(comma);
        }
        self.assignments(&node.incr_args);
        self.close(&tokens.close, ")");
        self.space();
        self.expression(&node.expr);
    }

    fn visit_lc_let_expr(&mut self, node: &LcLetExpr) {
        self.keyword_with_arguments(&node.tokens.let_keyword, &node.args, &node.tokens.args);
        self.space();
        self.expression(&node.expr);
    }

    fn visit_grouping_expr(&mut self, node: &GroupingExpr) {
        self.open(&node.tokens.open, "(", false);
        self.expression(&node.inner);
        self.close(&node.tokens.close, ")");
    }

    fn visit_anonymous_function_expr(&mut self, node: &AnonymousFunctionExpr) {
        self.keyword_with_arguments(
            &node.tokens.function_keyword,
            &node.definition_args,
            &node.tokens.args,
        );
        self.space();
        self.expression(&node.expr);
    }
}

impl<'c> Printer<'c> {
    /// Print the value of a statement; user line breaks inside it indent
    /// the continuation lines one level.
    fn hanging_expression(&mut self, expr: &Expression) {
        let outer = self.continuation.replace(self.indent);
        self.expression(expr);
        self.continuation = outer;
    }

    fn file_import(&mut self, tokens: &FileImportTokens) {
        self.lexeme(&tokens.keyword);
        self.space();
        self.lexeme(&tokens.filename);
        if let Some(semicolon) = &tokens.semicolon {
            self.glued(semicolon, ";");
        }
    }

    fn call_like(&mut self, node: &CallLikeExpr) {
        self.keyword_with_arguments(&node.tokens.keyword, &node.args, &node.tokens.args);
        if let Some(expr) = &node.expr {
            self.space();
            self.expression(expr);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{format_source, FormattingConfiguration};

    fn format(source: &str) -> String {
        format_source(source, &FormattingConfiguration::default()).unwrap()
    }

    #[test]
    fn test_module_declaration_with_noop_body() {
        let out = format("module asdf();");
        assert_eq!(out, "module asdf();\n");
        assert!(!out.contains(") ;"));
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(format("module m() {\n}"), "module m() {}\n");
    }

    #[test]
    fn test_block_is_indented() {
        assert_eq!(
            format("module m(){cube();sphere();}"),
            "module m() {\n    cube();\n    sphere();\n}\n"
        );
    }

    #[test]
    fn test_nested_block_indentation() {
        assert_eq!(
            format("union(){difference(){cube(10);sphere(6);}}"),
            "union() {\n    difference() {\n        cube(10);\n        sphere(6);\n    }\n}\n"
        );
    }

    #[test]
    fn test_comment_before_closing_brace() {
        assert_eq!(
            format("module m() {\n    cube();\n    // last\n}"),
            "module m() {\n    cube();\n    // last\n}\n"
        );
    }

    #[test]
    fn test_arguments_drop_useless_commas() {
        assert_eq!(format("cube(,, 10,, center=true,);"), "cube(10, center = true);\n");
    }

    #[test]
    fn test_vector_drops_trailing_commas() {
        assert_eq!(format("x = [10,,,,,];"), "x = [10];\n");
        assert_eq!(format("x = [,,];"), "x = [];\n");
    }

    #[test]
    fn test_operator_comment_is_kept() {
        assert_eq!(format("x = a /*plus*/ + b;"), "x = a /*plus*/ + b;\n");
    }

    #[test]
    fn test_short_chain_stays_inline() {
        assert_eq!(format("translate([1,0,0]) cube();"), "translate([1, 0, 0]) cube();\n");
    }

    #[test]
    fn test_long_chain_is_broken() {
        assert_eq!(
            format("translate([10, 20, 30]) rotate([0, 0, 45]) cube(10);"),
            "translate([10, 20, 30])\n    rotate([0, 0, 45])\n        cube(10);\n"
        );
    }

    #[test]
    fn test_chain_break_length_is_configurable() {
        let config = FormattingConfiguration {
            module_instantiation_break_length: 80,
            ..FormattingConfiguration::default()
        };
        let source = "translate([10, 20, 30]) rotate([0, 0, 45]) cube(10);";
        assert_eq!(format_source(source, &config).unwrap(), format!("{source}\n"));
    }

    #[test]
    fn test_chain_child_block_stays_on_line() {
        assert_eq!(
            format("translate([1, 2, 3]) { cube(); }"),
            "translate([1, 2, 3]) {\n    cube();\n}\n"
        );
    }

    #[test]
    fn test_tags_and_keyword_names() {
        assert_eq!(
            format("#for(i=[0:3])cube(i);"),
            "#for (i = [0:3]) cube(i);\n"
        );
        assert_eq!(format("!echo(\"x\");"), "!echo(\"x\");\n");
    }

    #[test]
    fn test_if_else() {
        assert_eq!(
            format("if(a){cube();}else if(b)sphere();else cylinder();"),
            "if (a) {\n    cube();\n} else if (b) sphere(); else cylinder();\n"
        );
    }

    #[test]
    fn test_use_and_include() {
        assert_eq!(
            format("use <lib/a.scad>\ninclude<b.scad>;"),
            "use <lib/a.scad>\ninclude <b.scad>;\n"
        );
    }

    #[test]
    fn test_function_declaration() {
        assert_eq!(
            format("function f(x,y=2)=x*y;"),
            "function f(x, y = 2) = x * y;\n"
        );
    }

    #[test]
    fn test_expressions() {
        assert_eq!(format("x=-a+!b;"), "x = -a + !b;\n");
        assert_eq!(format("x=c?1:2;"), "x = c ? 1 : 2;\n");
        assert_eq!(format("x=v[0].y;"), "x = v[0].y;\n");
        assert_eq!(format("x=[0:2:10];"), "x = [0:2:10];\n");
        assert_eq!(format("x=(1+2)*3;"), "x = (1 + 2) * 3;\n");
        assert_eq!(format("x=let(a=1)a;"), "x = let (a = 1) a;\n");
        assert_eq!(format("x=assert(a>0)a;"), "x = assert(a > 0) a;\n");
        assert_eq!(format("f=function(x)x*2;"), "f = function (x) x * 2;\n");
    }

    #[test]
    fn test_comprehensions() {
        assert_eq!(
            format("x=[for(i=[0:3])if(i%2==0)i else -i];"),
            "x = [for (i = [0:3]) if (i % 2 == 0) i else -i];\n"
        );
        assert_eq!(
            format("x=[for(i=0;i<3;i=i+1)each[i,i]];"),
            "x = [for (i = 0; i < 3; i = i + 1) each [i, i]];\n"
        );
        assert_eq!(format("x=[let(a=1)a];"), "x = [let (a = 1) a];\n");
    }

    #[test]
    fn test_multiline_vector_keeps_user_breaks() {
        assert_eq!(
            format("points = [\n[0, 0],\n[1, 0]\n];"),
            "points = [\n    [0, 0],\n    [1, 0]\n];\n"
        );
    }

    #[test]
    fn test_repeated_sign_is_spaced() {
        assert_eq!(format("x = - -1;"), "x = - -1;\n");
        assert_eq!(format("x = + +a - -b;"), "x = + +a - -b;\n");
        assert_eq!(format("x = -+1;"), "x = -+1;\n");
        assert_eq!(format("x = !!a;"), "x = !!a;\n");
        assert_eq!(format(&format("x = - -1;")), "x = - -1;\n");
    }

    #[test]
    fn test_broken_assignment_value_hangs() {
        let out = format("x = a ? // yes\n b : c;");
        assert_eq!(out, "x = a ? // yes\n    b : c;\n");
        assert_eq!(format(&out), out);
    }

    #[test]
    fn test_broken_value_in_block_hangs_one_level() {
        assert_eq!(
            format("module m() {\nx = 1 +\n2;\n}"),
            "module m() {\n    x = 1 +\n        2;\n}\n"
        );
        assert_eq!(
            format("function f(v) =\nv * 2;"),
            "function f(v) =\n    v * 2;\n"
        );
    }

    #[test]
    fn test_closing_bracket_does_not_hang() {
        assert_eq!(
            format("x = [\n1,\n2\n] + y;"),
            "x = [\n    1,\n    2\n] + y;\n"
        );
    }

    #[test]
    fn test_definitions_only() {
        let config = FormattingConfiguration {
            definitions_only: true,
            ..FormattingConfiguration::default()
        };
        let out = format_source(
            "module box(size = 10) { cube(size); }\nfunction area(w, h) = w * h;",
            &config,
        )
        .unwrap();
        assert_eq!(out, "module box(size = 10);\nfunction area(w, h);\n");
    }
}
