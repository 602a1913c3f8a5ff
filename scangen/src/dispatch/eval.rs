// scangen - generates dispatch code for hand-written scanners.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.


//! A tiny interpreter for the C subset that dispatch generators emit, so that
//! tests can check what generated functions do as well as how they read.

use std::{iter::Peekable, str::Chars};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Tok {
    Word(String),
    Int(usize),
    Char(char),
    Str(String),
    Punct(&'static str),
}

const PUNCTUATION: &[&str] = &["->", "(", ")", "{", "}", "[", "]", ":", ";", ",", "-", ">", "*"];

fn unescape(chars: &mut Peekable<Chars<'_>>) -> char {
    match chars.next() {
        Some('\\') => match chars.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some(c @ '0'..='7') => {
                let mut value = c.to_digit(8).unwrap();
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                char::from_u32(value).unwrap()
            }
            Some(c) => c,
            None => panic!("unterminated escape"),
        },
        Some(c) => c,
        None => panic!("unterminated literal"),
    }
}

fn tokenize(code: &str) -> Vec<Tok> {
    let mut tokens = Vec::new();
    let mut chars = code.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c.is_ascii_alphabetic() || c == '_' {
            let mut word = String::new();
            while let Some(&c) = chars.peek()
                && (c.is_ascii_alphanumeric() || c == '_')
            {
                word.push(c);
                chars.next();
            }
            tokens.push(Tok::Word(word));
        } else if c.is_ascii_digit() {
            let mut n = 0;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                n = n * 10 + digit as usize;
                chars.next();
            }
            tokens.push(Tok::Int(n));
        } else if c == '\'' {
            chars.next();
            let value = unescape(&mut chars);
            assert_eq!(chars.next(), Some('\''));
            tokens.push(Tok::Char(value));
        } else if c == '"' {
            chars.next();
            let mut s = String::new();
            while chars.peek() != Some(&'"') {
                s.push(unescape(&mut chars));
            }
            chars.next();
            tokens.push(Tok::Str(s));
        } else {
            let rest: String = chars.clone().take(2).collect();
            let punct = PUNCTUATION
                .iter()
                .find(|p| rest.starts_with(**p))
                .unwrap_or_else(|| panic!("unexpected character {c:?}"));
            for _ in 0..punct.len() {
                chars.next();
            }
            tokens.push(Tok::Punct(*punct));
        }
    }
    tokens
}

#[derive(Clone, Debug)]
enum Subject {
    /// `scanner->start[n]`
    Start(usize),
    /// `c`
    Char,
}

#[derive(Clone, Debug)]
enum Cond {
    /// `scanner->current - scanner->start > n`
    LongerThan(usize),
    /// `match(scanner, 'c')`
    Match(char),
}

#[derive(Clone, Debug)]
enum Arg {
    Int(usize),
    Str(String),
    Name(String),
}

#[derive(Clone, Debug)]
enum Expr {
    Name(String),
    Call(String, Vec<Arg>),
}

#[derive(Clone, Debug)]
enum Item {
    Case(char),
    Default,
    Stmt(Stmt),
}

#[derive(Clone, Debug)]
enum Stmt {
    Switch(Subject, Vec<Item>),
    If(Cond, Box<Stmt>),
    Return(Expr),
    Break,
    Empty,
    Block(Vec<Stmt>),
}

struct Parser {
    tokens: Vec<Tok>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> &Tok {
        &self.tokens[self.pos]
    }

    fn next(&mut self) -> Tok {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn punct(&mut self, p: &str) {
        match self.next() {
            Tok::Punct(q) if q == p => (),
            other => panic!("expected {p:?}, found {other:?}"),
        }
    }

    fn word(&mut self, w: &str) {
        match self.next() {
            Tok::Word(v) if v == w => (),
            other => panic!("expected {w:?}, found {other:?}"),
        }
    }

    fn int(&mut self) -> usize {
        match self.next() {
            Tok::Int(n) => n,
            other => panic!("expected integer, found {other:?}"),
        }
    }

    fn function(&mut self) -> Vec<Stmt> {
        while self.next() != Tok::Punct("{") {}
        let body = self.block();
        assert_eq!(self.pos, self.tokens.len(), "trailing tokens");
        body
    }

    /// Parses statements up to and including `}`.
    fn block(&mut self) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        while *self.peek() != Tok::Punct("}") {
            stmts.push(self.stmt());
        }
        self.next();
        stmts
    }

    fn stmt(&mut self) -> Stmt {
        match self.next() {
            Tok::Punct(";") => Stmt::Empty,
            Tok::Punct("{") => Stmt::Block(self.block()),
            Tok::Word(w) if w == "break" => {
                self.punct(";");
                Stmt::Break
            }
            Tok::Word(w) if w == "return" => {
                let expr = self.expr();
                self.punct(";");
                Stmt::Return(expr)
            }
            Tok::Word(w) if w == "if" => {
                self.punct("(");
                let cond = self.cond();
                self.punct(")");
                Stmt::If(cond, Box::new(self.stmt()))
            }
            Tok::Word(w) if w == "switch" => {
                self.punct("(");
                let subject = self.subject();
                self.punct(")");
                self.punct("{");
                let mut items = Vec::new();
                loop {
                    match self.peek().clone() {
                        Tok::Punct("}") => break,
                        Tok::Word(w) if w == "case" => {
                            self.next();
                            let Tok::Char(c) = self.next() else {
                                panic!("case label must be a character")
                            };
                            self.punct(":");
                            items.push(Item::Case(c));
                        }
                        Tok::Word(w) if w == "default" => {
                            self.next();
                            self.punct(":");
                            items.push(Item::Default);
                        }
                        _ => items.push(Item::Stmt(self.stmt())),
                    }
                }
                self.next();
                Stmt::Switch(subject, items)
            }
            other => panic!("unexpected {other:?} at start of statement"),
        }
    }

    fn subject(&mut self) -> Subject {
        match self.next() {
            Tok::Word(w) if w == "c" => Subject::Char,
            Tok::Word(w) if w == "scanner" => {
                self.punct("->");
                self.word("start");
                self.punct("[");
                let n = self.int();
                self.punct("]");
                Subject::Start(n)
            }
            other => panic!("unexpected switch subject {other:?}"),
        }
    }

    fn cond(&mut self) -> Cond {
        match self.next() {
            Tok::Word(w) if w == "scanner" => {
                self.punct("->");
                self.word("current");
                self.punct("-");
                self.word("scanner");
                self.punct("->");
                self.word("start");
                self.punct(">");
                Cond::LongerThan(self.int())
            }
            Tok::Word(_) => {
                self.punct("(");
                self.word("scanner");
                self.punct(",");
                let Tok::Char(c) = self.next() else {
                    panic!("match argument must be a character")
                };
                self.punct(")");
                Cond::Match(c)
            }
            other => panic!("unexpected condition {other:?}"),
        }
    }

    fn expr(&mut self) -> Expr {
        let Tok::Word(name) = self.next() else {
            panic!("expression must start with a name")
        };
        if *self.peek() != Tok::Punct("(") {
            return Expr::Name(name);
        }
        self.next();
        let mut args = Vec::new();
        loop {
            args.push(match self.next() {
                Tok::Int(n) => Arg::Int(n),
                Tok::Str(s) => Arg::Str(s),
                Tok::Word(w) => Arg::Name(w),
                other => panic!("unexpected argument {other:?}"),
            });
            match self.next() {
                Tok::Punct(",") => (),
                Tok::Punct(")") => break,
                other => panic!("unexpected {other:?} in argument list"),
            }
        }
        Expr::Call(name, args)
    }
}

/// What a dispatch function returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A token constant, directly or through the make-token or check-keyword
    /// functions.
    Token(String),

    /// A call to the error-token function, with its message.
    Error(String),
}

impl Outcome {
    pub fn token(name: &str) -> Self {
        Self::Token(name.into())
    }
}

enum Flow {
    Next,
    Break,
    Return(Outcome),
}

struct Machine<'a> {
    text: Vec<char>,
    c: char,
    current: usize,
    fallback: &'a str,
}

impl Machine<'_> {
    fn exec_all(&mut self, stmts: &[Stmt]) -> Flow {
        for stmt in stmts {
            match self.exec(stmt) {
                Flow::Next => (),
                flow => return flow,
            }
        }
        Flow::Next
    }

    fn exec(&mut self, stmt: &Stmt) -> Flow {
        match stmt {
            Stmt::Empty => Flow::Next,
            Stmt::Break => Flow::Break,
            Stmt::Block(stmts) => self.exec_all(stmts),
            Stmt::Return(expr) => Flow::Return(self.eval(expr)),
            Stmt::If(cond, then) => {
                if self.test(cond) {
                    self.exec(then)
                } else {
                    Flow::Next
                }
            }
            Stmt::Switch(subject, items) => {
                let value = match subject {
                    Subject::Char => self.c,
                    Subject::Start(n) => self.text.get(*n).copied().unwrap_or('\0'),
                };
                let start = items
                    .iter()
                    .position(|item| matches!(item, Item::Case(c) if *c == value))
                    .or_else(|| items.iter().position(|item| matches!(item, Item::Default)));
                let Some(start) = start else {
                    return Flow::Next;
                };
                for item in &items[start..] {
                    if let Item::Stmt(stmt) = item {
                        match self.exec(stmt) {
                            Flow::Next => (),
                            Flow::Break => return Flow::Next,
                            flow => return flow,
                        }
                    }
                }
                Flow::Next
            }
        }
    }

    fn test(&mut self, cond: &Cond) -> bool {
        match cond {
            Cond::LongerThan(n) => self.current > *n,
            Cond::Match(c) => {
                if self.text.get(self.current) == Some(c) {
                    self.current += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn eval(&self, expr: &Expr) -> Outcome {
        match expr {
            Expr::Name(name) => Outcome::Token(name.clone()),
            Expr::Call(_, args) => match args.as_slice() {
                [Arg::Name(_), Arg::Name(token)] => Outcome::Token(token.clone()),
                [Arg::Name(_), Arg::Str(message)] => Outcome::Error(message.clone()),
                [
                    Arg::Name(_),
                    Arg::Int(start),
                    Arg::Int(length),
                    Arg::Str(rest),
                    Arg::Name(token),
                ] => {
                    assert_eq!(rest.chars().count(), *length);
                    let matches = self.current == start + length
                        && self.text[*start..].iter().copied().eq(rest.chars());
                    Outcome::Token(if matches {
                        token.clone()
                    } else {
                        self.fallback.into()
                    })
                }
                other => panic!("unexpected call arguments {other:?}"),
            },
        }
    }
}

fn parse(code: &str) -> Vec<Stmt> {
    Parser {
        tokens: tokenize(code),
        pos: 0,
    }
    .function()
}

/// Runs a generated identifier dispatch function on `lexeme`.  `fallback` is
/// what the check-keyword function returns on mismatch.
pub fn run_identifier(code: &str, lexeme: &str, fallback: &str) -> Outcome {
    let body = parse(code);
    let text: Vec<char> = lexeme.chars().collect();
    let mut machine = Machine {
        current: text.len(),
        text,
        c: '\0',
        fallback,
    };
    match machine.exec_all(&body) {
        Flow::Return(outcome) => outcome,
        _ => panic!("{lexeme:?}: function ended without returning"),
    }
}

/// Runs a generated symbol dispatch function with the scanner positioned just
/// after the first character of `input`.  Returns the result and the number of
/// characters consumed.
pub fn run_symbol(code: &str, input: &str) -> (Outcome, usize) {
    let body = parse(code);
    let text: Vec<char> = input.chars().collect();
    let mut machine = Machine {
        c: text[0],
        text,
        current: 1,
        fallback: "",
    };
    match machine.exec_all(&body) {
        Flow::Return(outcome) => (outcome, machine.current),
        _ => panic!("{input:?}: function ended without returning"),
    }
}
